//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or a full directive)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include thread ids (useful when following digit workers)
    pub thread_ids: bool,

    /// Whether to colorize plain output
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "aas-server".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            thread_ids: true,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `AAS_SERVICE_NAME`: Service name (default: aas-server)
    /// - `AAS_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `AAS_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `AAS_THREAD_IDS`: Include thread ids (default: true)
    /// - `NO_COLOR`: Disable ANSI colors when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();
        let defaults = Self::default();

        Self {
            service_name: lookup("AAS_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("AAS_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("AAS_JSON_LOGS")
                .map(|v| is_truthy(&v))
                .unwrap_or(is_container),

            thread_ids: lookup("AAS_THREAD_IDS")
                .map(|v| is_truthy(&v))
                .unwrap_or(defaults.thread_ids),

            ansi: lookup("NO_COLOR").is_none(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
