//! Integration tests for endpoint probing with mock HTTP servers.

mod common;

use common::*;
use notedeck::dispatch::OperationDescriptor;
use notedeck::health::{HealthProber, HealthTracker, ProbeError, ProbeResult};
use notedeck::registry::Endpoint;
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn ok_root() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_probe_all_marks_responsive_and_hung() {
    let a = ok_root().await;
    let b = hung_server().await;

    let dispatcher = make_dispatcher(&[a.uri(), b.uri()], 0);
    let snapshots = dispatcher.probe_all().await;

    let verdicts: HashMap<String, bool> = snapshots
        .iter()
        .map(|s| (s.url.clone(), s.healthy))
        .collect();
    assert_eq!(verdicts.get(&a.uri()), Some(&true));
    assert_eq!(verdicts.get(&b.uri()), Some(&false));

    assert!(dispatcher.tracker().peek_healthy(&Endpoint::new(a.uri())));
    assert!(!dispatcher.tracker().peek_healthy(&Endpoint::new(b.uri())));
}

#[tokio::test]
async fn test_probe_results_follow_registry_order() {
    let a = hung_server().await;
    let b = ok_root().await;
    let urls = [a.uri(), dead_url(), b.uri()];

    let dispatcher = make_dispatcher(&urls, 0);
    let snapshots = dispatcher.probe_all().await;

    let order: Vec<_> = snapshots.iter().map(|s| s.url.clone()).collect();
    assert_eq!(order, urls.to_vec());
    assert!(snapshots[0].error.as_deref().unwrap().contains("timeout"));
    assert!(snapshots[2].latency_ms.is_some());
}

#[tokio::test]
async fn test_probe_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let registry = Arc::new(make_registry(&[server.uri()], 0));
    let tracker = Arc::new(HealthTracker::new());
    let prober = HealthProber::new(registry, tracker.clone());

    let endpoint = Endpoint::new(server.uri());
    let result = prober.check_endpoint(&endpoint).await;
    assert!(matches!(
        result,
        ProbeResult::Unhealthy {
            error: ProbeError::HttpError(503)
        }
    ));

    prober.apply_result(&endpoint, &result);
    assert!(!tracker.peek_healthy(&endpoint));
}

#[tokio::test]
async fn test_probe_connection_refused() {
    let registry = Arc::new(make_registry(&[dead_url()], 0));
    let prober = HealthProber::new(registry, Arc::new(HealthTracker::new()));

    let result = prober.check_endpoint(&Endpoint::new(dead_url())).await;
    assert!(matches!(
        result,
        ProbeResult::Unhealthy {
            error: ProbeError::ConnectionFailed(_)
        }
    ));
}

#[tokio::test]
async fn test_probe_round_steers_next_dispatch() {
    let a = hung_server().await;
    let b = notes_server(&[6]).await;

    let dispatcher = make_dispatcher(&[a.uri(), b.uri()], 1);
    dispatcher.probe_all().await;
    assert_eq!(dispatcher.preview_endpoint(), Some(Endpoint::new(b.uri())));

    let outcome = dispatcher
        .dispatch(&OperationDescriptor::get("/post"))
        .await
        .unwrap();
    assert_eq!(outcome.into_value(), notes_json(&[6]));
}

#[tokio::test]
async fn test_probe_recovers_previously_failed_endpoint() {
    let server = ok_root().await;

    let dispatcher = make_dispatcher(&[server.uri()], 0);
    let endpoint = Endpoint::new(server.uri());
    dispatcher.tracker().mark_unhealthy(&endpoint);

    dispatcher.probe_all().await;
    assert!(dispatcher.tracker().peek_healthy(&endpoint));
}
