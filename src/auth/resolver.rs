//! Caller identity resolution.

use async_trait::async_trait;

use crate::config::Settings;
use crate::shared::error::AppError;

use super::api_key::ApiKeyScheme;
use super::clerk::ClerkJwtScheme;
use super::credentials::Credentials;
use super::pairing::PairingJwtScheme;
use super::test_bypass::TestBypassScheme;

/// Resolves the caller identity behind a request.
///
/// Routes depend on this trait rather than the concrete resolver so tests
/// can substitute their own implementation.
#[async_trait]
pub trait CurrentUserResolver: Send + Sync {
    /// Resolve the user id, failing with `AppError::Unauthorized` when the
    /// request carries no acceptable credentials.
    async fn resolve(&self, credentials: &Credentials) -> Result<String, AppError>;

    /// Resolve the user id, or `None` when authentication fails.
    async fn resolve_optional(&self, credentials: &Credentials) -> Option<String> {
        self.resolve(credentials).await.ok()
    }
}

/// Outcome of a single scheme ruling on a request.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    /// The request carries no material this scheme understands.
    #[error("not applicable")]
    NotApplicable,

    /// The request carried material for this scheme and verification failed.
    #[error("{0}")]
    Rejected(String),
}

/// One credential verification method.
#[async_trait]
pub trait AuthScheme: Send + Sync {
    /// Scheme name for logs.
    fn name(&self) -> &'static str;

    /// Try to resolve a user id from the credentials.
    async fn authenticate(&self, credentials: &Credentials) -> Result<String, SchemeError>;
}

/// Resolver that tries each configured scheme in order and stops at the
/// first success.
pub struct MultiSchemeResolver {
    schemes: Vec<Box<dyn AuthScheme>>,
}

impl MultiSchemeResolver {
    /// Build a resolver from an explicit scheme list.
    pub fn new(schemes: Vec<Box<dyn AuthScheme>>) -> Self {
        Self { schemes }
    }

    /// Build the scheme chain from settings.
    ///
    /// Order: Clerk session tokens, mobile pairing tokens, API keys, then
    /// the test bypass. The bypass is never included in production.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut schemes: Vec<Box<dyn AuthScheme>> = Vec::new();

        if let Some(jwks_url) = non_empty(settings.auth.clerk_jwks_url.as_deref()) {
            schemes.push(Box::new(ClerkJwtScheme::new(jwks_url.to_string())));
        }
        if let Some(secret) = non_empty(settings.auth.pairing_secret.as_deref()) {
            schemes.push(Box::new(PairingJwtScheme::new(secret)));
        }
        if !settings.auth.api_keys.is_empty() {
            schemes.push(Box::new(ApiKeyScheme::from_entries(&settings.auth.api_keys)));
        }
        if !settings.is_production() {
            schemes.push(Box::new(TestBypassScheme));
        }

        tracing::debug!(schemes = schemes.len(), "auth scheme chain configured");
        Self { schemes }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl CurrentUserResolver for MultiSchemeResolver {
    async fn resolve(&self, credentials: &Credentials) -> Result<String, AppError> {
        for scheme in &self.schemes {
            match scheme.authenticate(credentials).await {
                Ok(user_id) => {
                    tracing::debug!(scheme = scheme.name(), user_id = %user_id, "authenticated");
                    return Ok(user_id);
                }
                Err(SchemeError::NotApplicable) => {}
                Err(SchemeError::Rejected(reason)) => {
                    tracing::debug!(scheme = scheme.name(), reason = %reason, "credentials rejected");
                }
            }
        }

        Err(AppError::Unauthorized("Not authenticated".into()))
    }
}
