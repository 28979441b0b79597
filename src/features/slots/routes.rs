use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::slots::handlers;
use crate::features::slots::services::SlotService;

/// Public slot routes
pub fn routes(service: Arc<SlotService>) -> Router {
    Router::new()
        .route("/api/slots/{id}/quote", get(handlers::get_slot_quote))
        .with_state(service)
}

/// Admin routes, nested under `/api/admin`
pub fn admin_routes(service: Arc<SlotService>) -> Router {
    Router::new()
        .route(
            "/slots",
            get(handlers::list_admin_slots).post(handlers::create_slot),
        )
        .with_state(service)
}
