//! # Addition Engine Service
//!
//! Runs one addition end to end: parallel fan-out, join, carry repair.
//! Working buffers are allocated per call and dropped with the result, so
//! nothing from one addition can leak into the next.

use std::sync::Arc;

use tracing::debug;

use crate::algorithms::resolve_carries;
use crate::config::EngineConfig;
use crate::domain::{Addition, Operands};
use crate::{create_backend, Backend, EngineError, SumEngine};

/// Addition engine - orchestrates the parallel stage and carry resolution.
#[derive(Clone)]
pub struct AdditionEngine {
    sum_engine: Arc<dyn SumEngine>,
}

impl AdditionEngine {
    /// Wrap an existing parallel stage.
    pub fn new(sum_engine: Arc<dyn SumEngine>) -> Self {
        Self { sum_engine }
    }

    /// Build the backend named by the config.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self::new(create_backend(config.backend, config)?))
    }

    /// Backend in use.
    pub fn backend(&self) -> Backend {
        self.sum_engine.backend()
    }

    /// Add two operands.
    ///
    /// Either returns the fully carried sum or fails as a whole; a failed
    /// parallel stage never reaches carry resolution.
    pub fn add(&self, operands: &Operands) -> Result<Addition, EngineError> {
        let raw = self.sum_engine.parallel_sum(operands)?;
        let local_carries = raw.carry_count();

        let addition = resolve_carries(raw);

        debug!(
            backend = %self.sum_engine.backend(),
            digits = operands.len(),
            local_carries,
            grew = addition.grew(),
            "Addition resolved"
        );

        Ok(addition)
    }
}

impl std::fmt::Debug for AdditionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdditionEngine")
            .field("backend", &self.sum_engine.backend())
            .finish()
    }
}
