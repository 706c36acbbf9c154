//! Common test utilities for API testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock search transport and a temporary catalog directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use shelf_core::{
    testing::MockTransport, Config, MediaLibrary, SearchConfig, SearchTransport, StorageConfig,
    WebshareConfig,
};
use shelf_server::{api::create_router, state::AppState};

/// Re-export fixtures for test convenience
pub use shelf_core::testing::fixtures;

/// Test fixture for API testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.transport.set_default_files(vec![...]).await;
///
///     let response = fixture.post("/api/v1/series/search", json!({ "title": "Silo" })).await;
///     assert_eq!(response.status, StatusCode::OK);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock transport - configure search listings
    pub transport: MockTransport,
    /// Temporary catalog directory
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Wire up the mock transport (otherwise search is unconfigured)
    pub with_transport: bool,
    /// Token placed in the Webshare config
    pub token: Option<String>,
    pub search: SearchConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            with_transport: true,
            token: None,
            search: SearchConfig {
                default_seasons: 1,
                ..SearchConfig::default()
            },
        }
    }
}

impl TestConfig {
    /// Create config without any search backend.
    pub fn without_transport() -> Self {
        Self {
            with_transport: false,
            ..Self::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let transport = MockTransport::new();

        let config = Config {
            storage: StorageConfig {
                data_dir: temp_dir.path().to_path_buf(),
            },
            search: test_config.search.clone(),
            webshare: Some(WebshareConfig {
                base_url: "http://webshare.invalid".to_string(),
                token: test_config.token.clone(),
                timeout_secs: 5,
            }),
            ..Config::default()
        };

        let library = MediaLibrary::open(config.search.clone(), &config.storage.data_dir)
            .expect("Failed to open library");

        let search_transport = test_config
            .with_transport
            .then(|| Arc::new(transport.clone()) as Arc<dyn SearchTransport>);

        let state = Arc::new(AppState::new(config, library, search_transport));
        let router = create_router(state);

        Self {
            router,
            transport,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a path and return the raw body text.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert response status with a helpful message.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
