//! `[logging]` section of `notedeck.toml`
//!
//! Diagnostics always go to stderr; stdout carries only command results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Modules that emit their own tracing events and can be tuned separately
/// through `[logging.component_levels]`.
pub const LOG_COMPONENTS: &[&str] = &[
    "board", "dispatch", "health", "notes", "realtime", "registry",
];

/// How log lines are rendered on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines, for interactive use
    #[default]
    Pretty,
    /// One JSON object per line, for piping into a log collector
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for every target, e.g. "warn" or "debug"
    pub level: String,
    pub format: LogFormat,
    /// Per-module overrides keyed by a [`LOG_COMPONENTS`] name,
    /// e.g. `dispatch = "debug"` to trace every failover attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl LoggingConfig {
    /// Component names in `component_levels` that no notedeck module logs
    /// under, sorted. Their directives would silently match nothing.
    pub fn unknown_components(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .component_levels
            .iter()
            .flat_map(|levels| levels.keys())
            .map(String::as_str)
            .filter(|name| !LOG_COMPONENTS.contains(name))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            // Failover retries are expected, only surface them when asked
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}
