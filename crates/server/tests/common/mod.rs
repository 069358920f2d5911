//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a seeded in-memory catalog and a mock poster source, enabling E2E
//! testing without touching the filesystem or network.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use cineniche_core::{testing::MockPosterSource, Config, PosterCache, PosterSourceKind};
use cineniche_server::state::AppState;

/// Re-export fixtures for test convenience
pub use cineniche_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server with:
/// - A catalog seeded from `fixtures::movies()` and two users
/// - A controllable poster source (MockPosterSource) listing
///   `fixtures::poster_paths()`
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_poster_match() {
///     let fixture = TestFixture::new().await;
///
///     let response = fixture.get("/api/v1/posters/match?title=Up").await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock poster source - swap listings, inject failures
    pub posters: Arc<MockPosterSource>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    /// Raw body text, for non-JSON endpoints
    pub text: String,
}

impl TestFixture {
    /// Create a new test fixture with default settings.
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    /// Create a test fixture with custom configuration.
    pub async fn with_config(test_config: TestConfig) -> Self {
        let posters = Arc::new(MockPosterSource::with_paths(fixtures::poster_paths()));
        if test_config.fail_first_listing {
            posters.fail_next("storage offline");
        }

        let mut config = Config::default();
        config.posters.source = PosterSourceKind::Static;
        config.posters.urls = fixtures::poster_paths()
            .into_iter()
            .map(str::to_string)
            .collect();
        config.posters.legacy_no_match_fallback = test_config.legacy_no_match_fallback;
        config.recommendations.max_count = 3;

        let catalog = Arc::new(fixtures::seeded_catalog().expect("Failed to seed catalog"));
        let poster_cache = Arc::new(PosterCache::new(
            Arc::clone(&posters) as Arc<dyn cineniche_core::PosterSource>,
            Duration::from_secs(3600),
        ));

        let state = Arc::new(AppState::new(config, catalog, poster_cache));
        let router = cineniche_server::api::create_router(state);

        Self { router, posters }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
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

        let request = request_builder.body(body).unwrap();

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

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body, text }
    }
}

/// Configuration for test fixture.
#[derive(Debug, Clone, Default)]
pub struct TestConfig {
    /// Answer unmatched titles with the whole listing
    pub legacy_no_match_fallback: bool,
    /// Make the first poster listing fail
    pub fail_first_listing: bool,
}

impl TestConfig {
    /// Create config with the legacy no-match fallback enabled.
    pub fn with_legacy_fallback() -> Self {
        Self {
            legacy_no_match_fallback: true,
            ..Default::default()
        }
    }

    /// Create config whose poster source fails on first use.
    pub fn with_failing_posters() -> Self {
        Self {
            fail_first_listing: true,
            ..Default::default()
        }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            $response.text
        );
    };
}
