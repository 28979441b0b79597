mod ad_pricing_settings;

pub use ad_pricing_settings::AdPricingSettings;
