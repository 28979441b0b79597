use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::seo::handlers;
use crate::features::seo::services::SeoService;

pub fn routes(service: Arc<SeoService>) -> Router {
    Router::new()
        .route("/sitemap.xml", get(handlers::get_sitemap))
        .route("/robots.txt", get(handlers::get_robots))
        .with_state(service)
}
