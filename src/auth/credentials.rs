//! Request credential material.

use axum::http::HeaderMap;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

/// Credential material carried by a request.
///
/// Every field is optional; the resolver decides which scheme the material
/// fits.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Bearer token from the `Authorization` header
    pub bearer_token: Option<String>,

    /// Value of the `X-API-Key` header
    pub api_key: Option<String>,

    /// Value of the `X-Test-Auth` header
    pub test_auth: Option<String>,

    /// Value of the `X-Test-User-Id` header
    pub test_user_id: Option<String>,
}

impl Credentials {
    /// Capture credential headers from a request.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let bearer_token = headers
            .typed_get::<Authorization<Bearer>>()
            .map(|Authorization(bearer)| bearer.token().to_string());

        Self {
            bearer_token,
            api_key: header_value(headers, "x-api-key"),
            test_auth: header_value(headers, "x-test-auth"),
            test_user_id: header_value(headers, "x-test-user-id"),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}
