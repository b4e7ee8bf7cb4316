//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use chat_api::auth::{Credentials, CurrentUserResolver};
use chat_api::config::{
    AuthSettings, CorsSettings, SentrySettings, ServerSettings, Settings, SupabaseSettings,
};
use chat_api::infrastructure::supabase::SupabaseProvider;
use chat_api::shared::error::AppError;
use chat_api::startup::{create_app, AppState};

/// User id used by the bypass headers in end-to-end tests
pub const TEST_USER_ID: &str = "test-user-123";

/// Shared secret used to mint pairing tokens in tests
pub const TEST_PAIRING_SECRET: &str = "pairing-secret-for-tests";

/// Settings mirroring a development deployment with a test database
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
        },
        supabase: SupabaseSettings {
            url: Some("https://test.supabase.co".into()),
            service_role_key: Some("test-key".into()),
        },
        auth: AuthSettings {
            clerk_jwks_url: None,
            pairing_secret: Some(TEST_PAIRING_SECRET.into()),
            api_keys: vec!["svc-key-123:svc-user-1".into()],
        },
        sentry: SentrySettings {
            dsn: None,
            traces_sample_rate: 0.1,
        },
        cors: CorsSettings {
            allowed_origins: vec![],
        },
        environment: "test".into(),
    }
}

/// Resolver stub that always yields the same user id
pub struct FixedResolver(pub &'static str);

#[async_trait]
impl CurrentUserResolver for FixedResolver {
    async fn resolve(&self, _credentials: &Credentials) -> Result<String, AppError> {
        Ok(self.0.to_string())
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a test application from the default test settings
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    /// Create a test application from explicit settings
    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(Arc::new(settings));
        Self {
            router: create_app(state),
        }
    }

    /// Create a test application with an injected user resolver
    pub fn with_resolver(resolver: Arc<dyn CurrentUserResolver>) -> Self {
        let settings = Arc::new(test_settings());
        let state = AppState::with_providers(
            settings.clone(),
            Arc::new(SupabaseProvider::new(settings)),
            resolver,
        );
        Self {
            router: create_app(state),
        }
    }

    /// Send a request to the application
    pub async fn request(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.request(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a GET request with extra headers
    pub async fn get_with_headers(&self, uri: &str, headers: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        for &(name, value) in headers {
            builder = builder.header(name, value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, uri: &str, token: &str) -> Response {
        let value = format!("Bearer {}", token);
        self.get_with_headers(uri, &[("authorization", value.as_str())])
            .await
    }

    /// Send a CORS preflight request for the given origin
    pub async fn preflight(&self, uri: &str, origin: &str) -> Response {
        self.request(
            Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .header("origin", origin)
                .header("access-control-request-method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Mint an HS256 pairing token for the given subject
pub fn pairing_token(sub: &str, expires_in_secs: i64) -> String {
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
    }

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &Claims {
            sub: sub.into(),
            exp: chrono::Utc::now().timestamp() + expires_in_secs,
        },
        &jsonwebtoken::EncodingKey::from_secret(TEST_PAIRING_SECRET.as_bytes()),
    )
    .unwrap()
}
