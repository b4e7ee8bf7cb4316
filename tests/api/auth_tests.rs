//! Authentication API Tests

use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{
    body_json, pairing_token, test_settings, FixedResolver, TestApp, TEST_USER_ID,
};

/// Requests without credentials are rejected
#[tokio::test]
async fn me_requires_authentication() {
    let app = TestApp::new();

    let response = app.get("/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], 401);
    assert_eq!(body["message"], "Not authenticated");
}

/// Bypass headers resolve outside production
#[tokio::test]
async fn test_bypass_resolves_in_test_environment() {
    let app = TestApp::new();

    let response = app
        .get_with_headers(
            "/api/v1/me",
            &[("x-test-auth", "true"), ("x-test-user-id", TEST_USER_ID)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user_id"], TEST_USER_ID);
}

/// The same bypass headers are refused in production
#[tokio::test]
async fn test_bypass_is_refused_in_production() {
    let mut settings = test_settings();
    settings.environment = "production".into();
    let app = TestApp::with_settings(settings);

    let response = app
        .get_with_headers(
            "/api/v1/me",
            &[("x-test-auth", "true"), ("x-test-user-id", TEST_USER_ID)],
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Pairing tokens resolve to their subject claim
#[tokio::test]
async fn pairing_token_authenticates() {
    let app = TestApp::new();
    let token = pairing_token("mobile-user-7", 3600);

    let response = app.get_auth("/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user_id"], "mobile-user-7");
}

/// Expired pairing tokens are rejected
#[tokio::test]
async fn expired_pairing_token_is_rejected() {
    let app = TestApp::new();
    let token = pairing_token("mobile-user-7", -3600);

    let response = app.get_auth("/api/v1/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Configured API keys resolve to their mapped user
#[tokio::test]
async fn api_key_authenticates_mapped_user() {
    let app = TestApp::new();

    let response = app
        .get_with_headers("/api/v1/me", &[("x-api-key", "svc-key-123")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user_id"], "svc-user-1");
}

/// Unknown API keys are rejected
#[tokio::test]
async fn unknown_api_key_is_rejected() {
    let app = TestApp::new();

    let response = app
        .get_with_headers("/api/v1/me", &[("x-api-key", "wrong-key")])
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An injected resolver replaces the scheme chain without touching config
#[tokio::test]
async fn injected_resolver_overrides_authentication() {
    let app = TestApp::with_resolver(Arc::new(FixedResolver("override-user")));

    let response = app.get("/api/v1/me").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["user_id"], "override-user");
}
