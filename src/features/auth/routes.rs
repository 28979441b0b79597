use crate::features::auth::handler;
use crate::features::auth::service::AuthService;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handler::get_me))
        .with_state(service)
}
