//! Health tracking module for endpoint health records.
//!
//! Keeps a process-lifetime map of per-endpoint verdicts that decay back to
//! "healthy" after a fixed staleness window, plus the liveness probe that
//! refreshes every endpoint at once.

mod clock;
mod error;
mod probe;
mod state;


pub use clock::*;
pub use error::*;
pub use probe::*;
pub use state::*;

use crate::registry::Endpoint;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Age after which a health record expires and the endpoint is presumed healthy again.
pub const STALENESS_WINDOW: Duration = Duration::from_secs(30);

/// Records and answers endpoint health with time-based expiry.
///
/// Missing records mean "unknown", which is treated as healthy. Writes are
/// last-write-wins.
///
/// # Examples
///
/// ```
/// use notedeck::health::HealthTracker;
/// use notedeck::registry::Endpoint;
///
/// let tracker = HealthTracker::new();
/// let endpoint = Endpoint::new("http://a.local");
///
/// assert!(tracker.is_healthy(&endpoint));
/// tracker.mark_unhealthy(&endpoint);
/// assert!(!tracker.is_healthy(&endpoint));
/// ```
pub struct HealthTracker {
    records: DashMap<Endpoint, HealthRecord>,
    clock: Arc<dyn Clock>,
    staleness: Duration,
}

impl HealthTracker {
    /// Create a tracker using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a tracker with a custom time source (for testing).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            clock,
            staleness: STALENESS_WINDOW,
        }
    }

    /// Whether `endpoint` should be considered healthy.
    ///
    /// Expired records are evicted as a side effect.
    pub fn is_healthy(&self, endpoint: &Endpoint) -> bool {
        let now = self.clock.now();

        // The read guard must be released before removing from the same shard
        match self.records.get(endpoint) {
            None => return true,
            Some(record) if !self.is_expired(&record, now) => return record.healthy,
            Some(_) => {}
        }

        // A fresh write may have landed since the read, only drop stale entries
        if self
            .records
            .remove_if(endpoint, |_, record| self.is_expired(record, now))
            .is_some()
        {
            tracing::debug!(endpoint = %endpoint, "Health record expired");
        }

        true
    }

    /// Same verdict as [`is_healthy`](Self::is_healthy) without evicting anything.
    pub fn peek_healthy(&self, endpoint: &Endpoint) -> bool {
        let now = self.clock.now();
        match self.records.get(endpoint) {
            Some(record) if !self.is_expired(&record, now) => record.healthy,
            _ => true,
        }
    }

    pub fn mark_healthy(&self, endpoint: &Endpoint) {
        self.set(endpoint, true);
    }

    pub fn mark_unhealthy(&self, endpoint: &Endpoint) {
        self.set(endpoint, false);
        tracing::warn!(endpoint = %endpoint, "Endpoint marked unhealthy");
    }

    /// Current record for `endpoint`, if any (expired or not).
    pub fn record(&self, endpoint: &Endpoint) -> Option<HealthRecord> {
        self.records.get(endpoint).map(|r| *r)
    }

    /// All live records as `(endpoint, healthy)` pairs.
    pub fn snapshot(&self) -> Vec<(Endpoint, bool)> {
        let now = self.clock.now();
        self.records
            .iter()
            .filter(|entry| !self.is_expired(entry.value(), now))
            .map(|entry| (entry.key().clone(), entry.value().healthy))
            .collect()
    }

    fn set(&self, endpoint: &Endpoint, healthy: bool) {
        self.records.insert(
            endpoint.clone(),
            HealthRecord {
                healthy,
                last_checked: self.clock.now(),
                checked_at: Utc::now(),
            },
        );
    }

    fn is_expired(&self, record: &HealthRecord, now: Instant) -> bool {
        now.saturating_duration_since(record.last_checked) >= self.staleness
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}
