//! Health Check API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{body_json, TestApp, TEST_USER_ID};

/// The health endpoint reports a stable body with a 200 status
#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, json!({"status": "ok", "service": "chat-api"}));
}

/// Auth headers have no effect on the health endpoint
#[tokio::test]
async fn health_check_ignores_auth_headers() {
    let app = TestApp::new();

    let response = app
        .get_with_headers(
            "/health",
            &[
                ("x-test-auth", "true"),
                ("x-test-user-id", TEST_USER_ID),
                ("authorization", "Bearer garbage"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"status": "ok", "service": "chat-api"}));
}

/// Unknown paths are a plain 404
#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
