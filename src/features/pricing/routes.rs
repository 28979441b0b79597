use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::pricing::handlers;
use crate::features::pricing::services::PricingSettingsService;

/// Public price list
pub fn routes(service: Arc<PricingSettingsService>) -> Router {
    Router::new()
        .route("/api/pricing", get(handlers::get_price_list))
        .with_state(service)
}

/// Admin routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<PricingSettingsService>) -> Router {
    Router::new()
        .route(
            "/ad-pricing",
            get(handlers::get_ad_pricing).put(handlers::update_ad_pricing),
        )
        .with_state(service)
}
