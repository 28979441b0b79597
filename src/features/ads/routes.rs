use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::ads::handlers;
use crate::features::ads::services::AdService;

/// Public ad card
pub fn routes(service: Arc<AdService>) -> Router {
    Router::new()
        .route("/api/ads/{id}", get(handlers::get_ad_card))
        .with_state(service)
}

/// Admin routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<AdService>) -> Router {
    Router::new()
        .route("/ads", get(handlers::list_active_ads))
        .route("/ads/stats", get(handlers::get_ad_stats))
        .route(
            "/ads/{id}",
            get(handlers::get_ad)
                .put(handlers::update_ad)
                .delete(handlers::delete_ad),
        )
        .route("/slots/{slot_id}/ads", post(handlers::create_ad))
        .with_state(service)
}
