//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;

use crate::auth::{CurrentUserResolver, MultiSchemeResolver};
use crate::config::Settings;
use crate::infrastructure::supabase::{DatabaseProvider, SupabaseProvider};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};
use crate::telemetry;

/// Application state shared across handlers
///
/// Holds the settings snapshot and the dependency providers as trait
/// objects, so tests can inject their own implementations.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub database: Arc<dyn DatabaseProvider>,
    pub user_resolver: Arc<dyn CurrentUserResolver>,
}

impl AppState {
    /// Create state with the default providers derived from settings.
    pub fn new(settings: Arc<Settings>) -> Self {
        let database = Arc::new(SupabaseProvider::new(settings.clone()));
        let user_resolver = Arc::new(MultiSchemeResolver::from_settings(&settings));
        Self {
            settings,
            database,
            user_resolver,
        }
    }

    /// Create state with injected providers.
    pub fn with_providers(
        settings: Arc<Settings>,
        database: Arc<dyn DatabaseProvider>,
        user_resolver: Arc<dyn CurrentUserResolver>,
    ) -> Self {
        Self {
            settings,
            database,
            user_resolver,
        }
    }
}

/// Build the router for the given state.
///
/// Every invocation produces an independent application; nothing is shared
/// between two apps built from different settings.
pub fn create_app(state: AppState) -> Router {
    let cors_layer = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(logging::create_trace_layer())
            .layer(cors_layer),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    // Dropping the guard flushes and shuts down Sentry.
    _sentry: Option<sentry::ClientInitGuard>,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        let sentry = telemetry::init_error_tracking(&settings);

        let settings = Arc::new(settings);
        let state = AppState::new(settings.clone());
        let router = create_app(state);

        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            _sentry: sentry,
        })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router).await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}
