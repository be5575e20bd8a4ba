//! Liveness probing of every configured endpoint.

use super::{HealthSnapshot, HealthTracker, ProbeError, ProbeResult};
use crate::metrics::PROBES;
use crate::registry::{Endpoint, EndpointRegistry};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;

/// Probes `GET /` on every endpoint concurrently and feeds the verdicts
/// into the [`HealthTracker`].
pub struct HealthProber {
    registry: Arc<EndpointRegistry>,
    tracker: Arc<HealthTracker>,
    /// HTTP client with connection pooling
    client: reqwest::Client,
}

impl HealthProber {
    pub fn new(registry: Arc<EndpointRegistry>, tracker: Arc<HealthTracker>) -> Self {
        Self::with_client(registry, tracker, reqwest::Client::new())
    }

    /// Create a prober with a custom HTTP client (for testing).
    pub fn with_client(
        registry: Arc<EndpointRegistry>,
        tracker: Arc<HealthTracker>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            registry,
            tracker,
            client,
        }
    }

    /// Check a single endpoint's liveness.
    pub async fn check_endpoint(&self, endpoint: &Endpoint) -> ProbeResult {
        let start = Instant::now();
        let timeout = self.registry.probe_timeout();

        match self
            .client
            .get(endpoint.join("/"))
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => {
                if response.status().is_success() {
                    ProbeResult::Healthy {
                        latency_ms: start.elapsed().as_millis() as u32,
                    }
                } else {
                    ProbeResult::Unhealthy {
                        error: ProbeError::HttpError(response.status().as_u16()),
                    }
                }
            }
            Err(e) => ProbeResult::Unhealthy {
                error: Self::classify_error(e, timeout.as_millis() as u64),
            },
        }
    }

    /// Classify reqwest error into ProbeError.
    fn classify_error(e: reqwest::Error, timeout_ms: u64) -> ProbeError {
        if e.is_timeout() {
            ProbeError::Timeout(timeout_ms)
        } else {
            ProbeError::ConnectionFailed(e.to_string())
        }
    }

    /// Record a probe outcome in the tracker.
    pub fn apply_result(&self, endpoint: &Endpoint, result: &ProbeResult) {
        let outcome = if result.is_healthy() {
            self.tracker.mark_healthy(endpoint);
            "healthy"
        } else {
            self.tracker.mark_unhealthy(endpoint);
            "unhealthy"
        };

        metrics::counter!(PROBES,
            "endpoint" => endpoint.url().to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }

    /// Probe every configured endpoint at once.
    ///
    /// Checks run concurrently with independent timeouts and are joined before
    /// returning, so the snapshot covers every endpoint in registry order.
    pub async fn probe_all(&self) -> Vec<HealthSnapshot> {
        let checks = self.registry.list().iter().map(|endpoint| async move {
            let result = self.check_endpoint(endpoint).await;
            self.apply_result(endpoint, &result);
            HealthSnapshot::from_result(endpoint.url(), &result)
        });

        let snapshot = join_all(checks).await;

        tracing::info!(
            endpoints_checked = snapshot.len(),
            healthy = snapshot.iter().filter(|s| s.healthy).count(),
            "Endpoint health probe completed"
        );

        snapshot
    }
}
