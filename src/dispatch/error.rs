//! Error types for request dispatch.

use crate::registry::Endpoint;
use std::fmt;
use thiserror::Error;

/// Why a single attempt against one endpoint failed.
///
/// These never escape the dispatcher on their own; they are only surfaced
/// inside [`DispatchError::AllEndpointsFailed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// Attempt exceeded the configured timeout and was aborted
    #[error("request timeout after {0}ms")]
    Timeout(u64),

    /// Connection-level failure (DNS, refused, reset, ...)
    #[error("network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Success status but the body was not valid JSON
    #[error("invalid response body: {0}")]
    InvalidBody(String),
}

/// Last observed failure for an endpoint that exhausted its attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointFailure {
    pub endpoint: Endpoint,
    pub error: AttemptError,
}

impl fmt::Display for EndpointFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.endpoint, self.error)
    }
}

/// Errors surfaced to callers of the dispatcher.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The registry holds no endpoints at all
    #[error("no endpoints configured")]
    NoEndpoints,

    /// Every candidate endpoint exhausted its attempts
    #[error(
        "all {} attempted endpoints are unavailable: {}",
        .failures.len(),
        join_failures(.failures)
    )]
    AllEndpointsFailed { failures: Vec<EndpointFailure> },
}

impl DispatchError {
    /// Per-endpoint failures in attempt order (empty for `NoEndpoints`).
    pub fn failures(&self) -> &[EndpointFailure] {
        match self {
            DispatchError::NoEndpoints => &[],
            DispatchError::AllEndpointsFailed { failures } => failures,
        }
    }
}

fn join_failures(failures: &[EndpointFailure]) -> String {
    failures
        .iter()
        .map(EndpointFailure::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
