pub mod handlers;
pub mod routes;
pub mod services;
pub mod sitemap;

pub use services::SeoService;
