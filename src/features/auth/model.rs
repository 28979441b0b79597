use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller identity resolved by the auth middleware.
///
/// `is_admin` comes from `profiles.is_admin`, not from the token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub is_admin: bool,
}
