//! CPU sum backend using Rayon
//!
//! The default backend. Positions are mapped onto a dedicated Rayon pool;
//! each task writes exactly one slot of the output buffer.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::panic_message;
use crate::algorithms::add_digits;
use crate::config::EngineConfig;
use crate::domain::{Operands, RawSum};
use crate::{Backend, DeviceInfo, EngineError, SumEngine};

/// Rayon-pool sum engine
pub struct CpuEngine {
    device_info: DeviceInfo,
    pool: ThreadPool,
}

impl CpuEngine {
    /// Build the pool. Failure to start its workers is resource exhaustion.
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        let workers = config.worker_threads.unwrap_or_else(num_cpus::get).max(1);

        let mut builder = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("aas-sum-{}", i));
        if let Some(stack_size) = config.thread_stack_size {
            builder = builder.stack_size(stack_size);
        }

        let pool = builder
            .build()
            .map_err(|e| EngineError::ResourceExhaustion(e.to_string()))?;

        Ok(Self {
            device_info: DeviceInfo {
                name: format!("CPU ({} workers)", workers),
                backend: Backend::Cpu,
                compute_units: workers as u32,
            },
            pool,
        })
    }
}

impl SumEngine for CpuEngine {
    fn backend(&self) -> Backend {
        Backend::Cpu
    }

    fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    fn parallel_sum(&self, operands: &Operands) -> Result<RawSum, EngineError> {
        let first = operands.first().digits();
        let second = operands.second().digits();
        let mut raw = RawSum::zeroed(operands.len());

        // `install` returns once every task has finished; a panicking task
        // unwinds through it.
        let joined = panic::catch_unwind(AssertUnwindSafe(|| {
            self.pool.install(|| {
                raw.slots_mut()
                    .par_iter_mut()
                    .zip(first.par_iter().zip(second.par_iter()))
                    .for_each(|(slot, (&a, &b))| *slot = add_digits(a, b));
            })
        }));

        joined.map_err(|payload| {
            EngineError::SynchronizationFailure(panic_message(payload.as_ref()))
        })?;

        Ok(raw)
    }
}
