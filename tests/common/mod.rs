//! Shared test utilities for notedeck integration tests.
//!
//! Builders for dispatchers over mock backends and canned note payloads.

#![allow(dead_code)]

use notedeck::dispatch::Dispatcher;
use notedeck::health::{Clock, HealthTracker};
use notedeck::registry::{Endpoint, EndpointRegistry};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Per-attempt timeout used by most tests; slow mocks sleep well past it.
pub const TEST_TIMEOUT: Duration = Duration::from_millis(200);

/// Delay for "hung" backends.
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

// =============================================================================
// Dispatcher Builders
// =============================================================================

/// Registry over `urls` with the test timeout and the given retry count.
pub fn make_registry(urls: &[String], max_retries: u32) -> EndpointRegistry {
    EndpointRegistry::new(
        urls.iter().map(Endpoint::new).collect(),
        TEST_TIMEOUT,
        max_retries,
    )
    .with_probe_timeout(TEST_TIMEOUT)
}

/// Dispatcher with fresh health state over `urls`.
pub fn make_dispatcher(urls: &[String], max_retries: u32) -> Dispatcher {
    Dispatcher::new(
        Arc::new(make_registry(urls, max_retries)),
        Arc::new(HealthTracker::new()),
    )
}

/// Dispatcher whose health records age by `clock`.
pub fn make_dispatcher_with_clock(
    urls: &[String],
    max_retries: u32,
    clock: Arc<dyn Clock>,
) -> Dispatcher {
    Dispatcher::new(
        Arc::new(make_registry(urls, max_retries)),
        Arc::new(HealthTracker::with_clock(clock)),
    )
}

// =============================================================================
// Mock Backends
// =============================================================================

/// Backend that answers every request after [`SLOW_RESPONSE`].
pub async fn hung_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_delay(SLOW_RESPONSE))
        .mount(&server)
        .await;
    server
}

/// Backend that answers `GET /` and `GET /post` with the given notes.
pub async fn notes_server(ids: &[i64]) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes_json(ids)))
        .mount(&server)
        .await;
    server
}

/// URL that refuses connections.
pub fn dead_url() -> String {
    "http://127.0.0.1:1".to_string()
}

// =============================================================================
// Payloads
// =============================================================================

/// Note collection as the API returns it.
pub fn notes_json(ids: &[i64]) -> serde_json::Value {
    serde_json::Value::Array(
        ids.iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "title": format!("note {}", id),
                    "content": "body",
                    "createdAt": "2024-05-01T08:00:00Z",
                    "updatedAt": "2024-05-01T08:00:00Z"
                })
            })
            .collect(),
    )
}
