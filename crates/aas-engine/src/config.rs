//! # Engine Configuration

use serde::{Deserialize, Serialize};

use crate::Backend;

/// Addition engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Parallel-stage backend. `Auto` picks the best one compiled in.
    pub backend: Backend,

    /// Rayon pool size. `None` uses one worker per logical CPU.
    pub worker_threads: Option<usize>,

    /// Stack size for worker threads, in bytes. `None` keeps the platform default.
    pub thread_stack_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            worker_threads: None,
            thread_stack_size: None,
        }
    }
}

impl EngineConfig {
    /// Create a config for testing (small, fixed pool).
    pub fn for_testing() -> Self {
        Self {
            backend: Backend::Cpu,
            worker_threads: Some(2),
            thread_stack_size: None,
        }
    }
}
