//! Endpoint Registry module.
//!
//! Holds the ordered, immutable list of candidate backends together with the
//! request tunables every dispatch uses.

mod endpoint;

pub use endpoint::*;

use crate::config::ClientConfig;
use std::time::Duration;

/// The Endpoint Registry stores the configured backends in priority order.
///
/// Built once at startup and shared read-only afterwards.
///
/// # Examples
///
/// ```
/// use notedeck::registry::EndpointRegistry;
/// use std::time::Duration;
///
/// let registry = EndpointRegistry::new(
///     vec!["http://a.local".into(), "http://b.local".into()],
///     Duration::from_millis(5000),
///     1,
/// );
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.list()[0].url(), "http://a.local");
/// assert_eq!(registry.max_retries(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct EndpointRegistry {
    endpoints: Vec<Endpoint>,
    timeout: Duration,
    max_retries: u32,
    probe_timeout: Duration,
}

impl EndpointRegistry {
    /// Default timeout applied to liveness probes.
    pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(3000);

    /// Create a registry from already-built endpoints.
    ///
    /// Blank URLs are dropped and duplicates keep their first position.
    pub fn new(endpoints: Vec<Endpoint>, timeout: Duration, max_retries: u32) -> Self {
        let mut unique: Vec<Endpoint> = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            if endpoint.url().is_empty() || unique.contains(&endpoint) {
                continue;
            }
            unique.push(endpoint);
        }

        Self {
            endpoints: unique,
            timeout,
            max_retries,
            probe_timeout: Self::DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Build the registry from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        let endpoints = config.endpoints.iter().map(Endpoint::new).collect();
        let registry = Self::new(
            endpoints,
            Duration::from_millis(config.request_timeout_ms),
            config.max_retries,
        )
        .with_probe_timeout(Duration::from_millis(config.probe_timeout_ms));

        for endpoint in registry.list() {
            tracing::debug!(endpoint = %endpoint, "Registered endpoint");
        }

        registry
    }

    /// Override the liveness probe timeout.
    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    /// Endpoints in configured priority order.
    pub fn list(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Per-attempt request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries allowed per endpoint after the initial attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Timeout for a single liveness probe.
    pub fn probe_timeout(&self) -> Duration {
        self.probe_timeout
    }

    /// Position of `endpoint` in configured order.
    pub fn position(&self, endpoint: &Endpoint) -> Option<usize> {
        self.endpoints.iter().position(|e| e == endpoint)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
