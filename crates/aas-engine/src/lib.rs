//! # AAS-Engine: Bounded-Base Addition Core
//!
//! Adds two equal-length sequences of base-1000 digits (most significant
//! first) as if each were a big number, returning the carried sum.
//!
//! ## Pipeline
//!
//! ```text
//! Operands ──→ ParallelSumStage ──→ RawSum ──→ CarryResolver ──→ Addition
//!              (one task per digit,            (right-to-left sweep,
//!               local carry flags)              optional leading 1)
//! ```
//!
//! The parallel stage gives every task exclusive ownership of one output
//! slot, so the only synchronization is the final join. The resolver then
//! runs alone over the joined buffer.
//!
//! ## Backends
//!
//! | Backend | Fan-out | Failure mapping |
//! |---------|---------|-----------------|
//! | `Auto` | `Cpu` when compiled in, else `Threads` | as resolved |
//! | `Cpu` | Rayon pool, data-parallel map over slots | pool build → `ResourceExhaustion`, worker panic → `SynchronizationFailure` |
//! | `Threads` | One scoped OS thread per digit | spawn → `ResourceExhaustion`, join → `SynchronizationFailure` |
//!
//! ## Usage
//!
//! ```rust
//! use aas_engine::{AdditionEngine, DigitSequence, EngineConfig, Operands};
//!
//! let engine = AdditionEngine::from_config(&EngineConfig::default()).unwrap();
//! let operands = Operands::new(
//!     DigitSequence::from_values(&[999, 999]).unwrap(),
//!     DigitSequence::from_values(&[0, 1]).unwrap(),
//! )
//! .unwrap();
//!
//! let sum = engine.add(&operands).unwrap();
//! assert_eq!(sum.values(), vec![1, 0, 0]);
//! assert!(sum.grew());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod backends;
pub mod config;
pub mod domain;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use algorithms::{add_digits, add_sequential, resolve_carries};
pub use application::AdditionEngine;
pub use config::EngineConfig;
pub use domain::{
    invariant_digit_bound, invariant_growth, Addition, Digit, DigitSequence, DigitSum,
    DomainError, Operands, RawSum, BASE, MAX_DIGIT, N_MAX,
};

/// Parallel-stage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Best available backend, picked by [`auto_detect`]
    Auto,
    /// Rayon thread pool
    Cpu,
    /// One OS thread per digit position
    Threads,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Auto => write!(f, "Auto"),
            Backend::Cpu => write!(f, "CPU (Rayon)"),
            Backend::Threads => write!(f, "Thread-per-digit"),
        }
    }
}

impl FromStr for Backend {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Backend::Auto),
            "cpu" | "rayon" => Ok(Backend::Cpu),
            "threads" | "thread" => Ok(Backend::Threads),
            other => Err(EngineError::UnknownBackend(other.to_string())),
        }
    }
}

/// Engine errors. Each one aborts the whole addition; no partial result exists.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A worker (or the pool hosting it) could not be created.
    #[error("Resource exhaustion: {0}")]
    ResourceExhaustion(String),

    /// The join barrier could not complete.
    #[error("Synchronization failure: {0}")]
    SynchronizationFailure(String),

    /// The requested backend was compiled out.
    #[error("Backend not available: {0}")]
    BackendUnavailable(Backend),

    /// Backend name did not match any known backend.
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),
}

/// Backend information
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    /// Human-readable name
    pub name: String,
    /// Backend kind
    pub backend: Backend,
    /// Worker count (pool size, or 0 when one worker is spawned per digit)
    pub compute_units: u32,
}

/// Parallel sum stage, implemented by every backend.
pub trait SumEngine: Send + Sync {
    /// Get backend type
    fn backend(&self) -> Backend;

    /// Get device info
    fn device_info(&self) -> &DeviceInfo;

    /// Add every position independently and join.
    ///
    /// Returns only after every position has been written. Carries are
    /// local to each position; see [`resolve_carries`].
    fn parallel_sum(&self, operands: &Operands) -> Result<RawSum, EngineError>;
}

/// Create the best available engine (the Rayon pool when compiled in).
pub fn auto_detect(config: &EngineConfig) -> Result<Arc<dyn SumEngine>, EngineError> {
    #[cfg(feature = "cpu")]
    {
        let engine = backends::cpu::CpuEngine::new(config)?;
        tracing::info!(
            "Using CPU sum engine: {} workers (Rayon)",
            engine.device_info().compute_units
        );
        Ok(Arc::new(engine))
    }

    #[cfg(not(feature = "cpu"))]
    {
        tracing::info!("Using thread-per-digit sum engine");
        Ok(Arc::new(backends::threads::ThreadEngine::new(config)))
    }
}

/// Create a specific backend
pub fn create_backend(
    backend: Backend,
    config: &EngineConfig,
) -> Result<Arc<dyn SumEngine>, EngineError> {
    match backend {
        Backend::Auto => auto_detect(config),
        Backend::Cpu => {
            #[cfg(feature = "cpu")]
            {
                backends::cpu::CpuEngine::new(config).map(|e| Arc::new(e) as Arc<dyn SumEngine>)
            }
            #[cfg(not(feature = "cpu"))]
            {
                Err(EngineError::BackendUnavailable(backend))
            }
        }
        Backend::Threads => Ok(Arc::new(backends::threads::ThreadEngine::new(config))),
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
