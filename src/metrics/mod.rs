//! Client-side counters.
//!
//! Dispatch and probe code record through the `metrics` facade. The binary
//! installs a Prometheus recorder only when `--metrics` is passed and prints
//! the snapshot for that run to stderr once the command finishes.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

/// Attempts per endpoint, labelled `endpoint` and `outcome` (`success` / `failure`).
pub const DISPATCH_ATTEMPTS: &str = "notedeck_dispatch_attempts_total";
/// Dispatches that exhausted every candidate endpoint.
pub const DISPATCH_EXHAUSTED: &str = "notedeck_dispatch_exhausted_total";
/// Liveness probes, labelled `endpoint` and `outcome` (`healthy` / `unhealthy`).
pub const PROBES: &str = "notedeck_probes_total";

/// Register descriptions for every counter.
pub fn describe_metrics() {
    metrics::describe_counter!(DISPATCH_ATTEMPTS, "Request attempts against an endpoint");
    metrics::describe_counter!(
        DISPATCH_EXHAUSTED,
        "Requests that failed on every attempted endpoint"
    );
    metrics::describe_counter!(PROBES, "Endpoint liveness probes");
}

/// Build a recorder without installing it (for scoped use).
pub fn build_recorder() -> PrometheusRecorder {
    PrometheusBuilder::new().build_recorder()
}

/// Install the global Prometheus recorder.
///
/// Returns a handle that renders the counters in text exposition format.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_recorder_renders_counters() {
        let recorder = build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            describe_metrics();
            metrics::counter!(DISPATCH_EXHAUSTED).increment(2);
        });

        let rendered = handle.render();
        assert!(rendered.contains("notedeck_dispatch_exhausted_total 2"));
        assert!(rendered.contains("Requests that failed on every attempted endpoint"));
    }

    #[test]
    fn test_counters_outside_recorder_are_not_captured() {
        let recorder = build_recorder();
        let handle = recorder.handle();

        metrics::counter!(PROBES).increment(1);
        assert!(!handle.render().contains(PROBES));
    }
}
