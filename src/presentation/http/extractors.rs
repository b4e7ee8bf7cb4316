//! Custom Extractors
//!
//! Axum extractors for authentication and database access.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::auth::Credentials;
use crate::infrastructure::supabase::SupabaseClient;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated caller identity.
///
/// Rejects the request with 401 when no configured scheme accepts the
/// supplied credentials.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = Credentials::from_headers(&parts.headers);
        let user_id = state.user_resolver.resolve(&credentials).await?;
        Ok(AuthUser { user_id })
    }
}

/// Caller identity when present; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<String>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = Credentials::from_headers(&parts.headers);
        Ok(Self(
            state.user_resolver.resolve_optional(&credentials).await,
        ))
    }
}

/// Database client for routes that require storage.
///
/// Rejects the request with 503 when Supabase credentials are not
/// configured.
#[derive(Clone)]
pub struct DatabaseClient(pub Arc<SupabaseClient>);

impl FromRequestParts<AppState> for DatabaseClient {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(state.database.client_required()?))
    }
}
