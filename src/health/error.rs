//! Error types for liveness probes.

use thiserror::Error;

/// Errors that can occur while probing an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Probe did not complete in time
    #[error("probe timeout after {0}ms")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Endpoint answered with a non-success status
    #[error("HTTP error: {0}")]
    HttpError(u16),
}
