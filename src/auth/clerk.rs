//! Clerk session token verification.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::credentials::Credentials;
use super::resolver::{AuthScheme, SchemeError};

/// How long a fetched JWKS stays fresh.
const JWKS_CACHE_TTL: Duration = Duration::from_secs(600);

/// Claims read from a Clerk session token.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
}

/// Verifies RS256 session tokens against the Clerk instance JWKS.
///
/// The key set is fetched lazily and cached inside the scheme, so each
/// application instance keeps its own copy.
pub struct ClerkJwtScheme {
    jwks_url: String,
    http: reqwest::Client,
    cached_keys: RwLock<Option<CachedKeys>>,
}

impl ClerkJwtScheme {
    pub fn new(jwks_url: String) -> Self {
        Self {
            jwks_url,
            http: reqwest::Client::new(),
            cached_keys: RwLock::new(None),
        }
    }

    /// Fetch the JWKS, reusing the cached copy while it is fresh.
    async fn jwks(&self) -> Result<JwkSet, SchemeError> {
        {
            let cached = self.cached_keys.read().await;
            if let Some(cached) = cached.as_ref() {
                if cached.fetched_at.elapsed() < JWKS_CACHE_TTL {
                    return Ok(cached.keys.clone());
                }
            }
        }

        tracing::debug!(url = %self.jwks_url, "fetching Clerk JWKS");
        let keys: JwkSet = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| SchemeError::Rejected(format!("JWKS fetch failed: {}", e)))?
            .error_for_status()
            .map_err(|e| SchemeError::Rejected(format!("JWKS fetch failed: {}", e)))?
            .json()
            .await
            .map_err(|e| SchemeError::Rejected(format!("JWKS parse failed: {}", e)))?;

        let mut cached = self.cached_keys.write().await;
        *cached = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });

        Ok(keys)
    }
}

#[async_trait]
impl AuthScheme for ClerkJwtScheme {
    fn name(&self) -> &'static str {
        "clerk-jwt"
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<String, SchemeError> {
        let token = credentials
            .bearer_token
            .as_deref()
            .ok_or(SchemeError::NotApplicable)?;

        // Inspect the header before touching the network. Bearer material
        // that is not an RS256 token belongs to another scheme.
        let header = decode_header(token)
            .map_err(|e| SchemeError::Rejected(format!("invalid token header: {}", e)))?;
        if header.alg != Algorithm::RS256 {
            return Err(SchemeError::NotApplicable);
        }
        let kid = header
            .kid
            .ok_or_else(|| SchemeError::Rejected("missing 'kid' in token header".into()))?;

        let jwks = self.jwks().await?;
        let jwk = jwks
            .find(&kid)
            .ok_or_else(|| SchemeError::Rejected(format!("no JWKS key matches kid {}", kid)))?;
        let decoding_key = DecodingKey::from_jwk(jwk)
            .map_err(|e| SchemeError::Rejected(format!("unusable JWK: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;

        let decoded = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| SchemeError::Rejected(format!("token validation failed: {}", e)))?;

        Ok(decoded.claims.sub)
    }
}
