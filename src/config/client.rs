//! API client configuration

use serde::{Deserialize, Serialize};

/// Default backend when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3002";

/// Maximum number of endpoints read from `NOTEDECK_API_URL_<n>` variables.
pub const MAX_ENV_ENDPOINTS: usize = 3;

/// Endpoint list and request tunables for the failover client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Candidate backend base URLs, in priority order
    pub endpoints: Vec<String>,
    /// Per-attempt request timeout
    pub request_timeout_ms: u64,
    /// Retries per endpoint after the first attempt
    pub max_retries: u32,
    /// Timeout for each liveness probe
    pub probe_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![DEFAULT_API_URL.to_string()],
            request_timeout_ms: 5000,
            max_retries: 1,
            probe_timeout_ms: 3000,
        }
    }
}
