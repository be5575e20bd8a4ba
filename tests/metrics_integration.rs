//! Counter recording for dispatch and liveness checks.
//!
//! Each test scopes a Prometheus recorder to its own thread, so counters
//! from parallel tests never mix.

mod common;

use common::*;
use notedeck::dispatch::OperationDescriptor;
use notedeck::metrics::{build_recorder, DISPATCH_ATTEMPTS, DISPATCH_EXHAUSTED, PROBES};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Value of the first sample of `name` whose labels include every pair in `labels`.
fn counter_value(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<u64> {
    rendered
        .lines()
        .filter(|line| {
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
        })
        .find(|line| {
            labels
                .iter()
                .all(|(key, value)| line.contains(&format!("{}=\"{}\"", key, value)))
        })
        .and_then(|line| line.rsplit(' ').next())
        .and_then(|value| value.parse().ok())
}

async fn failing_server(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_failed_endpoint_counts_every_attempt() {
    let recorder = build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let a = failing_server(500).await;
    let b = notes_server(&[1]).await;
    let max_retries = 2;

    let dispatcher = make_dispatcher(&[a.uri(), b.uri()], max_retries);
    dispatcher
        .dispatch(&OperationDescriptor::get("/post"))
        .await
        .unwrap();

    let rendered = handle.render();
    let a_uri = a.uri();
    let b_uri = b.uri();
    assert_eq!(
        counter_value(
            &rendered,
            DISPATCH_ATTEMPTS,
            &[("endpoint", a_uri.as_str()), ("outcome", "failure")]
        ),
        Some(u64::from(max_retries) + 1)
    );
    assert_eq!(
        counter_value(
            &rendered,
            DISPATCH_ATTEMPTS,
            &[("endpoint", b_uri.as_str()), ("outcome", "success")]
        ),
        Some(1)
    );
    assert_eq!(counter_value(&rendered, DISPATCH_EXHAUSTED, &[]), None);
}

#[tokio::test]
async fn test_total_failure_counts_exhaustion_once() {
    let recorder = build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let a = failing_server(503).await;
    let b = failing_server(500).await;

    let dispatcher = make_dispatcher(&[a.uri(), b.uri()], 1);
    assert!(dispatcher
        .dispatch(&OperationDescriptor::get("/post"))
        .await
        .is_err());

    let rendered = handle.render();
    assert_eq!(counter_value(&rendered, DISPATCH_EXHAUSTED, &[]), Some(1));
    for uri in [a.uri(), b.uri()] {
        assert_eq!(
            counter_value(
                &rendered,
                DISPATCH_ATTEMPTS,
                &[("endpoint", uri.as_str()), ("outcome", "failure")]
            ),
            Some(2)
        );
    }
}

#[tokio::test]
async fn test_liveness_check_outcomes_are_counted() {
    let recorder = build_recorder();
    let handle = recorder.handle();
    let _guard = metrics::set_default_local_recorder(&recorder);

    let up = notes_server(&[]).await;
    let down = failing_server(502).await;

    let dispatcher = make_dispatcher(&[up.uri(), down.uri()], 0);
    dispatcher.probe_all().await;

    let rendered = handle.render();
    let up_uri = up.uri();
    let down_uri = down.uri();
    assert_eq!(
        counter_value(
            &rendered,
            PROBES,
            &[("endpoint", up_uri.as_str()), ("outcome", "healthy")]
        ),
        Some(1)
    );
    assert_eq!(
        counter_value(
            &rendered,
            PROBES,
            &[("endpoint", down_uri.as_str()), ("outcome", "unhealthy")]
        ),
        Some(1)
    );
}
