//! # AAS Telemetry
//!
//! Logging setup shared by the array addition server binaries and tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use aas_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(&TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     tracing::info!("ready");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AAS_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `AAS_JSON_LOGS` | `false` | JSON output |
//! | `AAS_THREAD_IDS` | `true` | Include thread ids |
//! | `AAS_SERVICE_NAME` | `aas-server` | Service name |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed, or installation failed.
    #[error("Failed to initialize subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_logging(config)
}
