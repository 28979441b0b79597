mod seo_service;

pub use seo_service::SeoService;
