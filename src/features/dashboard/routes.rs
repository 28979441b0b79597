use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Dashboard routes, nested under `/api/admin`
pub fn admin_routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/dashboard", get(handlers::get_summary))
        .with_state(dashboard_service)
}
