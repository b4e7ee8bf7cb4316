//! CORS Middleware Configuration

use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::config::CorsSettings;

/// Origins used when none are configured.
const FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Create CORS layer from settings
///
/// Browser clients send cookies, so credentials stay enabled and the layer
/// mirrors requested methods and headers instead of using wildcards.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(resolve_origins(settings))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Configured origins, or the localhost development pair when none are set.
fn resolve_origins(settings: &CorsSettings) -> Vec<HeaderValue> {
    let configured: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if configured.is_empty() {
        FALLBACK_ORIGINS
            .into_iter()
            .map(HeaderValue::from_static)
            .collect()
    } else {
        configured
    }
}
