//! Configuration module for notedeck
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`NOTEDECK_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use notedeck::config::NotedeckConfig;
//!
//! let config = NotedeckConfig::default();
//! assert_eq!(config.client.request_timeout_ms, 5000);
//!
//! let toml = r#"
//! [client]
//! endpoints = ["https://notes-a.example.com", "https://notes-b.example.com"]
//! max_retries = 2
//! "#;
//! let config: NotedeckConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.client.endpoints.len(), 2);
//! ```

pub mod client;
pub mod error;
pub mod logging;

pub use client::{ClientConfig, DEFAULT_API_URL, MAX_ENV_ENDPOINTS};
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig, LOG_COMPONENTS};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the notedeck client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NotedeckConfig {
    /// Endpoint list and request tunables
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl NotedeckConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports NOTEDECK_* environment variables. Invalid values are silently
    /// ignored (previous values are kept).
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// `NOTEDECK_API_URL_1` through `NOTEDECK_API_URL_3` replace the endpoint
    /// list when at least one of them is non-empty; blank entries are dropped.
    /// An unset `NOTEDECK_API_URL_1` does not fall back to the localhost
    /// default, so setting only the second or third URL yields just that URL.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let urls: Vec<String> = (1..=MAX_ENV_ENDPOINTS)
            .filter_map(|n| lookup(&format!("NOTEDECK_API_URL_{}", n)))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if !urls.is_empty() {
            self.client.endpoints = urls;
        }

        if let Some(Ok(ms)) = lookup("NOTEDECK_REQUEST_TIMEOUT_MS").map(|v| v.parse()) {
            self.client.request_timeout_ms = ms;
        }
        if let Some(Ok(retries)) = lookup("NOTEDECK_MAX_RETRIES").map(|v| v.parse()) {
            self.client.max_retries = retries;
        }
        if let Some(Ok(ms)) = lookup("NOTEDECK_PROBE_TIMEOUT_MS").map(|v| v.parse()) {
            self.client.probe_timeout_ms = ms;
        }

        if let Some(level) = lookup("NOTEDECK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(Ok(format)) = lookup("NOTEDECK_LOG_FORMAT").map(|v| v.parse()) {
            self.logging.format = format;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls: Vec<&String> = self
            .client
            .endpoints
            .iter()
            .filter(|url| !url.trim().is_empty())
            .collect();

        if urls.is_empty() {
            return Err(ConfigError::Validation {
                field: "client.endpoints".to_string(),
                message: "at least one endpoint URL is required".to_string(),
            });
        }

        for (i, url) in self.client.endpoints.iter().enumerate() {
            if url.trim().is_empty() {
                continue;
            }
            let parsed = reqwest::Url::parse(url.trim()).map_err(|e| ConfigError::Validation {
                field: format!("client.endpoints[{}]", i),
                message: format!("invalid URL '{}': {}", url, e),
            })?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(ConfigError::Validation {
                    field: format!("client.endpoints[{}]", i),
                    message: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }

        if self.client.request_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "client.request_timeout_ms".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.client.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation {
                field: "client.probe_timeout_ms".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
