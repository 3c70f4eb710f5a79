//! Common test utilities for E2E testing with a mock upstream.
//!
//! Provides a test fixture that builds the server in-process with a
//! scriptable mock ticket source injected, so the whole consumer surface
//! can be exercised without network infrastructure.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use farefeed_core::testing::MockTicketSource;
use farefeed_core::{Config, ServerConfig, TicketSource, UpstreamConfig};
use farefeed_server::api::create_router;
use farefeed_server::state::AppState;

/// Re-export fixtures for test convenience
#[allow(unused_imports)]
pub use farefeed_core::testing::fixtures;

/// Test fixture for E2E testing with a mock upstream source.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new();
/// fixture.source.push_batch(fixtures::raw_batch(10), true).await;
///
/// let response = fixture.post("/api/v1/search", None).await;
/// assert_eq!(response.status, StatusCode::ACCEPTED);
/// ```
pub struct TestFixture {
    /// The Axum router for in-process requests.
    pub router: Router,
    /// Mock upstream - script batches and failures here.
    pub source: Arc<MockTicketSource>,
    /// The shared app state, for direct session access.
    pub state: Arc<AppState>,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with an empty mock source.
    pub fn new() -> Self {
        let config = Config {
            upstream: UpstreamConfig {
                // Never contacted; the mock source replaces the HTTP client.
                base_url: "http://mock.invalid".to_string(),
                timeout_secs: 5,
            },
            server: ServerConfig::default(),
        };

        let source = Arc::new(MockTicketSource::new());
        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&source) as Arc<dyn TicketSource>,
        ));
        let router = create_router(Arc::clone(&state));

        Self {
            router,
            source,
            state,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with an optional JSON body.
    pub async fn post(&self, path: &str, body: Option<Value>) -> TestResponse {
        self.request("POST", path, body).await
    }

    /// Send a DELETE request.
    #[allow(dead_code)]
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Start a search and wait for its ingestion loop to finish.
    pub async fn run_search_to_completion(&self) -> TestResponse {
        let response = self.post("/api/v1/search", None).await;
        let session = self
            .state
            .session()
            .await
            .expect("search did not create a session");
        session.wait().await;
        response
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
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
