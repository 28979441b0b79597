use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::Request, middleware::Next, response::Response, Router};

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        email: Some("admin@example.lt".to_string()),
        is_admin: true,
    }
}

pub fn regular_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-user".to_string(),
        email: None,
        is_admin: false,
    }
}

async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(admin_user());
    next.run(request).await
}

async fn inject_regular_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(regular_user());
    next.run(request).await
}

/// Wrap a router so every request arrives as a signed-in admin
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}

/// Wrap a router so every request arrives as a signed-in non-admin
pub fn with_user_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_regular_user_middleware))
}
