//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{routing::get, Router};

use super::handlers;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoint (no auth, no dependencies)
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new().route("/me", get(handlers::user::get_current_user))
}
