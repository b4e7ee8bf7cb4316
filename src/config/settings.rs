//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Supabase project configuration
    #[serde(default)]
    pub supabase: SupabaseSettings,

    /// Authentication scheme configuration
    #[serde(default)]
    pub auth: AuthSettings,

    /// Sentry error tracking configuration
    pub sentry: SentrySettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// Supabase project configuration.
///
/// Both fields are optional; the service runs without a database when
/// credentials are absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseSettings {
    /// Project URL (e.g., "https://xyzcompany.supabase.co")
    pub url: Option<String>,

    /// Service role key used for server-side REST access
    pub service_role_key: Option<String>,
}

/// Authentication scheme configuration.
///
/// Each scheme is enabled only when its material is present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    /// Clerk JWKS endpoint for verifying RS256 session tokens
    pub clerk_jwks_url: Option<String>,

    /// Shared secret for HS256 mobile pairing tokens
    pub pairing_secret: Option<String>,

    /// Static API keys as "key:user-id" entries (comma-separated in env)
    #[serde(default)]
    pub api_keys: Vec<String>,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SentrySettings {
    /// DSN; error tracking is disabled when unset
    pub dsn: Option<String>,

    /// Fraction of transactions sampled for tracing
    pub traces_sample_rate: f32,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{ENVIRONMENT}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("sentry.traces_sample_rate", 0.1)?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=8000 -> server.port = 8000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option(
                "server.host",
                std::env::var("SERVER_HOST").ok(),
            )?
            .set_override_option(
                "server.port",
                std::env::var("SERVER_PORT").ok(),
            )?
            .set_override_option(
                "supabase.url",
                std::env::var("SUPABASE_URL").ok(),
            )?
            .set_override_option(
                "supabase.service_role_key",
                std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            )?
            .set_override_option(
                "auth.clerk_jwks_url",
                std::env::var("CLERK_JWKS_URL").ok(),
            )?
            .set_override_option(
                "auth.pairing_secret",
                std::env::var("PAIRING_JWT_SECRET").ok(),
            )?
            .set_override_option(
                "auth.api_keys",
                std::env::var("API_KEYS").ok().map(split_list),
            )?
            .set_override_option(
                "sentry.dsn",
                std::env::var("SENTRY_DSN").ok(),
            )?
            .set_override_option(
                "sentry.traces_sample_rate",
                std::env::var("SENTRY_TRACES_SAMPLE_RATE").ok(),
            )?
            .set_override_option(
                "cors.allowed_origins",
                std::env::var("ALLOWED_ORIGINS").ok().map(split_list),
            )?
            .build()?
            .try_deserialize()
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether the service runs in the production environment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl SupabaseSettings {
    /// Return the (url, service role key) pair when both are configured.
    ///
    /// Empty strings count as missing.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|v| !v.is_empty())?;
        let key = self.service_role_key.as_deref().filter(|v| !v.is_empty())?;
        Some((url, key))
    }
}

/// Split a comma-separated environment value into trimmed entries.
fn split_list(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}
