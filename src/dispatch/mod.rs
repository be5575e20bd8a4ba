//! Request dispatch with endpoint ordering, bounded retry and failover.
//!
//! A [`Dispatcher`] executes one logical operation against the best available
//! endpoint. Candidates are tried strictly one after another, never in
//! parallel, so a mutating request is never sent to two backends at once.

mod error;
mod operation;
mod ordering;


pub use error::*;
pub use operation::*;
pub use ordering::order_candidates;

use crate::config::ClientConfig;
use crate::health::{HealthProber, HealthSnapshot, HealthTracker};
use crate::metrics::{DISPATCH_ATTEMPTS, DISPATCH_EXHAUSTED};
use crate::registry::{Endpoint, EndpointRegistry};
use reqwest::header::CONTENT_TYPE;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::Instrument;

/// Failover client over the configured endpoints.
///
/// Owns the shared health and active-endpoint state for the process; create
/// one at startup and share it behind an `Arc`.
pub struct Dispatcher {
    registry: Arc<EndpointRegistry>,
    tracker: Arc<HealthTracker>,
    /// Registry index of the endpoint that most recently succeeded
    active: RwLock<Option<usize>>,
    prober: HealthProber,
    /// HTTP client with connection pooling
    client: reqwest::Client,
}

impl Dispatcher {
    pub fn new(registry: Arc<EndpointRegistry>, tracker: Arc<HealthTracker>) -> Self {
        Self::with_client(registry, tracker, reqwest::Client::new())
    }

    /// Create a dispatcher with a custom HTTP client (for testing).
    pub fn with_client(
        registry: Arc<EndpointRegistry>,
        tracker: Arc<HealthTracker>,
        client: reqwest::Client,
    ) -> Self {
        let prober = HealthProber::with_client(registry.clone(), tracker.clone(), client.clone());
        Self {
            registry,
            tracker,
            active: RwLock::new(None),
            prober,
            client,
        }
    }

    /// Build a dispatcher with fresh health state from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            Arc::new(EndpointRegistry::from_config(config)),
            Arc::new(HealthTracker::new()),
        )
    }

    pub fn registry(&self) -> &Arc<EndpointRegistry> {
        &self.registry
    }

    pub fn tracker(&self) -> &Arc<HealthTracker> {
        &self.tracker
    }

    /// Endpoint that most recently served a request successfully.
    pub fn active_endpoint(&self) -> Option<Endpoint> {
        self.active_index()
            .and_then(|index| self.registry.list().get(index).cloned())
    }

    /// Candidate order for the next dispatch. Read-only.
    pub fn candidates(&self) -> Vec<Endpoint> {
        order_candidates(self.registry.list(), self.active_index(), |endpoint| {
            self.tracker.peek_healthy(endpoint)
        })
    }

    /// The endpoint a dispatch issued now would try first.
    ///
    /// Never mutates health or active-endpoint state.
    pub fn preview_endpoint(&self) -> Option<Endpoint> {
        self.candidates().into_iter().next()
    }

    /// Probe every endpoint concurrently and refresh its health record.
    pub async fn probe_all(&self) -> Vec<HealthSnapshot> {
        self.prober.probe_all().await
    }

    /// Execute `operation`, failing over across endpoints.
    ///
    /// Returns the first successful outcome, or an aggregated error naming the
    /// last failure of every attempted endpoint in attempt order.
    pub async fn dispatch(
        &self,
        operation: &OperationDescriptor,
    ) -> Result<DispatchOutcome, DispatchError> {
        let span = tracing::info_span!(
            "dispatch",
            request_id = %uuid::Uuid::new_v4(),
            method = %operation.method(),
            path = operation.path(),
        );
        self.dispatch_inner(operation).instrument(span).await
    }

    async fn dispatch_inner(
        &self,
        operation: &OperationDescriptor,
    ) -> Result<DispatchOutcome, DispatchError> {
        let candidates = self.candidates();
        if candidates.is_empty() {
            tracing::error!("Dispatch with no configured endpoints");
            return Err(DispatchError::NoEndpoints);
        }

        let last = candidates.len() - 1;
        let mut failures = Vec::new();

        for (position, endpoint) in candidates.iter().enumerate() {
            // The final candidate is always tried, even on an unhealthy verdict
            if position < last && !self.tracker.is_healthy(endpoint) {
                tracing::debug!(endpoint = %endpoint, "Skipping unhealthy endpoint");
                continue;
            }

            match self.try_endpoint(endpoint, operation).await {
                Ok(outcome) => {
                    self.tracker.mark_healthy(endpoint);
                    self.set_active(endpoint);
                    tracing::info!(endpoint = %endpoint, "Request succeeded");
                    return Ok(outcome);
                }
                Err(error) => {
                    self.tracker.mark_unhealthy(endpoint);
                    failures.push(EndpointFailure {
                        endpoint: endpoint.clone(),
                        error,
                    });
                }
            }
        }

        metrics::counter!(DISPATCH_EXHAUSTED).increment(1);
        tracing::error!(
            attempted = failures.len(),
            "All endpoints failed for request"
        );
        Err(DispatchError::AllEndpointsFailed { failures })
    }

    /// Up to `max_retries + 1` attempts against one endpoint.
    async fn try_endpoint(
        &self,
        endpoint: &Endpoint,
        operation: &OperationDescriptor,
    ) -> Result<DispatchOutcome, AttemptError> {
        let attempts = self.registry.max_retries() + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            tracing::debug!(endpoint = %endpoint, attempt, "Sending request");

            match self.attempt(endpoint, operation).await {
                Ok(outcome) => {
                    record_attempt(endpoint, "success");
                    return Ok(outcome);
                }
                Err(error) => {
                    record_attempt(endpoint, "failure");
                    tracing::warn!(
                        endpoint = %endpoint,
                        attempt,
                        max_attempts = attempts,
                        error = %error,
                        "Request attempt failed"
                    );
                    last_error = Some(error);
                }
            }
        }

        // attempts >= 1, so at least one error was recorded
        Err(last_error.unwrap_or_else(|| AttemptError::Network("no attempt made".to_string())))
    }

    /// One timed attempt: send, check status, read and parse the body.
    async fn attempt(
        &self,
        endpoint: &Endpoint,
        operation: &OperationDescriptor,
    ) -> Result<DispatchOutcome, AttemptError> {
        let timeout = self.registry.timeout();

        let mut request = self
            .client
            .request(operation.method().clone(), endpoint.join(operation.path()))
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout);
        if let Some(body) = operation.body() {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(e, timeout))?;

        DispatchOutcome::parse(&body).map_err(|e| AttemptError::InvalidBody(e.to_string()))
    }

    fn active_index(&self) -> Option<usize> {
        *self.active.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_active(&self, endpoint: &Endpoint) {
        if let Some(index) = self.registry.position(endpoint) {
            *self.active.write().unwrap_or_else(|e| e.into_inner()) = Some(index);
        }
    }
}

/// Classify reqwest error into AttemptError.
fn classify_error(e: reqwest::Error, timeout: Duration) -> AttemptError {
    if e.is_timeout() {
        AttemptError::Timeout(timeout.as_millis() as u64)
    } else {
        AttemptError::Network(e.to_string())
    }
}

fn record_attempt(endpoint: &Endpoint, outcome: &'static str) {
    metrics::counter!(DISPATCH_ATTEMPTS,
        "endpoint" => endpoint.url().to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
