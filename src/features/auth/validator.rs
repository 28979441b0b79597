use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "aud")]
    _aud: AudienceClaim,
    #[serde(rename = "exp")]
    _exp: u64,
}

/// Audience can be either a single string or an array of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum AudienceClaim {
    Single(String),
    Multiple(Vec<String>),
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    /// Verify the token signature and standard claims.
    ///
    /// The returned user is not yet an admin; the middleware resolves that
    /// against the profiles table.
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Unauthorized(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("Missing kid in token header".to_string()))?;

        let verification = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        // The key decides the algorithm, never the token header
        if header.alg != verification.algorithm {
            return Err(AppError::Unauthorized(format!(
                "Unexpected algorithm {:?} for key {}",
                header.alg, kid
            )));
        }

        let mut validation = Validation::new(verification.algorithm);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let claims = decode::<Claims>(token, &verification.key, &validation)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?
            .claims;

        Ok(AuthenticatedUser {
            sub: claims.sub,
            email: claims.email,
            is_admin: false,
        })
    }
}
