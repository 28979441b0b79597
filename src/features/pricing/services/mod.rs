mod pricing_settings_service;

pub use pricing_settings_service::PricingSettingsService;
