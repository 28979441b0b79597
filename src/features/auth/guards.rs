//! Authorization guards for dashboard handlers.

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Error code returned when a signed-in user lacks dashboard rights
pub const NOT_ADMIN: &str = "not_admin";

/// Guard for dashboard operations.
///
/// Only allows users whose profile has `is_admin = true`.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin {
            tracing::warn!("Dashboard access denied for {}", user.sub);
            return Err(AppError::Forbidden(NOT_ADMIN.to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}
