//! Supabase Module
//!
//! Thin authenticated handle over the Supabase REST API and the provider
//! trait the rest of the application reaches it through.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use reqwest::{Client, Method, RequestBuilder};

use crate::config::Settings;
use crate::shared::error::AppError;

/// Message returned when a route requires the database and no credentials
/// are configured.
pub const DATABASE_UNAVAILABLE: &str =
    "Database not available. Supabase credentials not configured.";

/// Authenticated handle over the Supabase REST API.
///
/// Construction performs no I/O; requests are issued through the wrapped
/// `reqwest` client.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    service_role_key: String,
}

impl SupabaseClient {
    /// Create a client for the given project URL and service role key.
    pub fn new(url: &str, service_role_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.to_string(),
        }
    }

    /// Project base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Start an authenticated request against `/rest/v1/{table}`.
    pub fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http
            .request(method, url)
            .header("apikey", self.service_role_key.clone())
            .bearer_auth(&self.service_role_key)
    }
}

/// Access to the optionally configured database client.
///
/// Routes depend on this trait rather than the concrete provider so tests
/// can substitute their own implementation.
pub trait DatabaseProvider: Send + Sync {
    /// The client, or `None` when Supabase credentials are not configured.
    fn client(&self) -> Option<Arc<SupabaseClient>>;

    /// The client, or a 503 error when credentials are not configured.
    fn client_required(&self) -> Result<Arc<SupabaseClient>, AppError> {
        self.client()
            .ok_or_else(|| AppError::ServiceUnavailable(DATABASE_UNAVAILABLE.into()))
    }
}

/// Settings-backed provider that builds the client on first access and
/// caches it for the lifetime of the application instance.
pub struct SupabaseProvider {
    settings: Arc<Settings>,
    client: OnceCell<Option<Arc<SupabaseClient>>>,
}

impl SupabaseProvider {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }
}

impl DatabaseProvider for SupabaseProvider {
    fn client(&self) -> Option<Arc<SupabaseClient>> {
        self.client
            .get_or_init(|| match self.settings.supabase.credentials() {
                Some((url, key)) => {
                    tracing::debug!(url = %url, "Supabase client initialized");
                    Some(Arc::new(SupabaseClient::new(url, key)))
                }
                None => {
                    tracing::warn!("Supabase credentials not configured; database access disabled");
                    None
                }
            })
            .clone()
    }
}
