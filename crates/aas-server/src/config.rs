//! # Server Configuration
//!
//! Loaded in layers: defaults, then an optional JSON file, then `AAS_*`
//! environment variables. The binary applies its command-line flags last.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `AAS_BIND_ADDR` | `network.bind_addr` |
//! | `AAS_PORT` | `network.port` |
//! | `AAS_BACKLOG` | `network.backlog` |
//! | `AAS_MAX_SESSIONS` | `max_sessions` |
//! | `AAS_ENGINE_BACKEND` | `engine.backend` |
//! | `AAS_WORKER_THREADS` | `engine.worker_threads` |

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use aas_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Smallest accepted `max_line_bytes`.
pub const MIN_LINE_BYTES: usize = 8;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Could not read config file {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for this schema.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// A value is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Listening socket configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Local address to bind.
    pub bind_addr: IpAddr,
    /// TCP port. 0 lets the OS pick one.
    pub port: u16,
    /// Pending-connection queue length passed to `listen`.
    pub backlog: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 60000,
            backlog: 3,
        }
    }
}

/// Wire size limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Size of one line in either direction, newline included. Input frames
    /// hold one byte less.
    pub max_line_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 100,
        }
    }
}

/// Complete server configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening socket.
    pub network: NetworkConfig,
    /// Line limits.
    pub limits: LimitsConfig,
    /// Addition engine.
    pub engine: EngineConfig,
    /// Sessions to serve before stopping. 0 means no limit.
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            limits: LimitsConfig::default(),
            engine: EngineConfig::default(),
            max_sessions: 1,
        }
    }
}

impl ServerConfig {
    /// Loopback, OS-assigned port, small engine pool.
    pub fn for_testing() -> Self {
        Self {
            network: NetworkConfig {
                bind_addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: 0,
                backlog: 3,
            },
            limits: LimitsConfig::default(),
            engine: EngineConfig::for_testing(),
            max_sessions: 1,
        }
    }

    /// Defaults, overlaid with `path` when given, then with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `AAS_*` overrides. Unparseable values are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from(&lookup, "AAS_BIND_ADDR", &mut self.network.bind_addr);
        override_from(&lookup, "AAS_PORT", &mut self.network.port);
        override_from(&lookup, "AAS_BACKLOG", &mut self.network.backlog);
        override_from(&lookup, "AAS_MAX_SESSIONS", &mut self.max_sessions);
        override_from(&lookup, "AAS_ENGINE_BACKEND", &mut self.engine.backend);

        if let Some(raw) = lookup("AAS_WORKER_THREADS") {
            match raw.parse::<usize>() {
                Ok(0) => self.engine.worker_threads = None,
                Ok(n) => self.engine.worker_threads = Some(n),
                Err(_) => warn!(value = %raw, "AAS_WORKER_THREADS must be a number, ignoring"),
            }
        }
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.backlog == 0 {
            return Err(ConfigError::Invalid {
                field: "network.backlog",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.limits.max_line_bytes < MIN_LINE_BYTES {
            return Err(ConfigError::Invalid {
                field: "limits.max_line_bytes",
                reason: format!("must be at least {}", MIN_LINE_BYTES),
            });
        }
        if self.engine.worker_threads == Some(0) {
            return Err(ConfigError::Invalid {
                field: "engine.worker_threads",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.network.bind_addr, self.network.port)
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(key, value = %raw, "Invalid environment override, ignoring"),
        }
    }
}
