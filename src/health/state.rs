//! Per-endpoint health records and probe snapshots.

use super::error::ProbeError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

/// Cached verdict on an endpoint's recent behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthRecord {
    /// Whether the last dispatch or probe against the endpoint succeeded
    pub healthy: bool,
    /// Monotonic stamp used for staleness checks
    pub last_checked: Instant,
    /// Wall-clock stamp for display
    pub checked_at: DateTime<Utc>,
}

/// Outcome of a single liveness probe.
#[derive(Debug, Clone)]
pub enum ProbeResult {
    /// Endpoint answered `GET /` with a success status
    Healthy { latency_ms: u32 },
    /// Endpoint failed to answer, timed out, or returned an error status
    Unhealthy { error: ProbeError },
}

impl ProbeResult {
    pub fn is_healthy(&self) -> bool {
        matches!(self, ProbeResult::Healthy { .. })
    }
}

/// Health report for one endpoint, as produced by a probe round.
#[derive(Debug, Clone, Serialize)]
pub struct HealthSnapshot {
    pub url: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthSnapshot {
    pub fn from_result(url: &str, result: &ProbeResult) -> Self {
        let (healthy, latency_ms, error) = match result {
            ProbeResult::Healthy { latency_ms } => (true, Some(*latency_ms), None),
            ProbeResult::Unhealthy { error } => (false, None, Some(error.to_string())),
        };

        Self {
            url: url.to_string(),
            healthy,
            latency_ms,
            error,
            checked_at: Utc::now(),
        }
    }
}
