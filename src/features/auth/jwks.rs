use jsonwebtoken::{Algorithm, DecodingKey};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
    #[serde(default)]
    crv: Option<String>,
    #[serde(default)]
    x: Option<String>,
    #[serde(default)]
    y: Option<String>,
}

/// A verification key together with the only algorithm it may be used with
#[derive(Clone)]
pub struct VerificationKey {
    pub key: DecodingKey,
    pub algorithm: Algorithm,
}

struct JwksCache {
    keys: HashMap<String, VerificationKey>,
    last_fetched: Instant,
}

/// Fetches and caches the issuer's signing keys (RSA and P-256 EC).
pub struct JwksClient {
    jwks_url: String,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<JwksCache>>>,
    cache_ttl: Duration,
}

impl JwksClient {
    pub fn new(jwks_url: &str, cache_ttl: Duration) -> Self {
        Self {
            jwks_url: jwks_url.to_string(),
            client: reqwest::Client::new(),
            cache: Arc::new(RwLock::new(None)),
            cache_ttl,
        }
    }

    pub async fn get_key(&self, kid: &str) -> Result<VerificationKey, JwksError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                if cached.last_fetched.elapsed() < self.cache_ttl {
                    if let Some(key) = cached.keys.get(kid) {
                        return Ok(key.clone());
                    }
                }
            }
        }

        // Cache miss or expired; a rotated key shows up on refetch
        self.fetch_jwks().await?;

        let cache = self.cache.read().await;
        cache
            .as_ref()
            .and_then(|cached| cached.keys.get(kid).cloned())
            .ok_or_else(|| JwksError::KeyNotFound(kid.to_string()))
    }

    async fn fetch_jwks(&self) -> Result<(), JwksError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::FetchError(format!(
                "Failed to fetch JWKS: HTTP {}",
                response.status()
            )));
        }

        let jwks: JwksResponse = response
            .json()
            .await
            .map_err(|e| JwksError::ParseError(e.to_string()))?;

        let keys = Self::decode_keys(jwks.keys)?;
        tracing::debug!("Loaded {} signing keys from {}", keys.len(), self.jwks_url);

        let mut cache = self.cache.write().await;
        *cache = Some(JwksCache {
            keys,
            last_fetched: Instant::now(),
        });

        Ok(())
    }

    fn decode_keys(jwks: Vec<Jwk>) -> Result<HashMap<String, VerificationKey>, JwksError> {
        let mut keys = HashMap::new();

        for jwk in jwks {
            let decoded = match (jwk.kty.as_str(), jwk.crv.as_deref()) {
                ("RSA", _) => match (&jwk.n, &jwk.e) {
                    (Some(n), Some(e)) => Some(VerificationKey {
                        key: DecodingKey::from_rsa_components(n, e)
                            .map_err(|e| JwksError::KeyConversionError(e.to_string()))?,
                        algorithm: Algorithm::RS256,
                    }),
                    _ => None,
                },
                ("EC", Some("P-256")) => match (&jwk.x, &jwk.y) {
                    (Some(x), Some(y)) => Some(VerificationKey {
                        key: DecodingKey::from_ec_components(x, y)
                            .map_err(|e| JwksError::KeyConversionError(e.to_string()))?,
                        algorithm: Algorithm::ES256,
                    }),
                    _ => None,
                },
                _ => None,
            };

            match decoded {
                Some(key) => {
                    keys.insert(jwk.kid, key);
                }
                None => tracing::debug!("Skipping unsupported JWK kid={} kty={}", jwk.kid, jwk.kty),
            }
        }

        Ok(keys)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwksError {
    #[error("Failed to fetch JWKS: {0}")]
    FetchError(String),

    #[error("Failed to parse JWKS: {0}")]
    ParseError(String),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to convert key: {0}")]
    KeyConversionError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keys_skips_unsupported_types() {
        let jwks: JwksResponse = serde_json::from_value(serde_json::json!({
            "keys": [
                { "kid": "sym", "kty": "oct", "k": "c2VjcmV0" },
                { "kid": "ec384", "kty": "EC", "crv": "P-384", "x": "AA", "y": "AA" },
                { "kid": "rsa-incomplete", "kty": "RSA" }
            ]
        }))
        .unwrap();

        let keys = JwksClient::decode_keys(jwks.keys).unwrap();
        assert!(keys.is_empty());
    }
}
