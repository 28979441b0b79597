use sqlx::PgPool;

use crate::core::error::Result;
use crate::features::auth::dto::MeResponseDto;
use crate::features::auth::model::AuthenticatedUser;

/// Resolves dashboard access from the `profiles` table.
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Make sure a profile row exists for the token subject and return its admin flag.
    ///
    /// New profiles start without admin rights; granting them is a manual
    /// database operation.
    pub async fn resolve_admin(&self, sub: &str, email: Option<&str>) -> Result<bool> {
        let is_admin: bool = sqlx::query_scalar(
            r#"
            INSERT INTO profiles (id, email)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
                SET email = COALESCE(EXCLUDED.email, profiles.email)
            RETURNING is_admin
            "#,
        )
        .bind(sub)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve profile for {}: {:?}", sub, e);
            e
        })?;

        Ok(is_admin)
    }

    pub fn current_user(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }
}
