//! Thread-per-digit sum backend
//!
//! Spawns one scoped OS thread per position. Each thread receives its two
//! input digits by value and an exclusive reference to its output slot.
//! If a spawn fails part-way, the threads already running are still joined
//! when the scope closes, and the whole addition fails.

use std::thread;

use super::panic_message;
use crate::algorithms::add_digits;
use crate::config::EngineConfig;
use crate::domain::{Operands, RawSum};
use crate::{Backend, DeviceInfo, EngineError, SumEngine};

/// Thread-per-digit sum engine
pub struct ThreadEngine {
    device_info: DeviceInfo,
    stack_size: Option<usize>,
}

impl ThreadEngine {
    /// Create the engine. Threads are spawned per call, not up front.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            device_info: DeviceInfo {
                name: "Thread-per-digit".to_string(),
                backend: Backend::Threads,
                compute_units: 0,
            },
            stack_size: config.thread_stack_size,
        }
    }
}

impl SumEngine for ThreadEngine {
    fn backend(&self) -> Backend {
        Backend::Threads
    }

    fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    fn parallel_sum(&self, operands: &Operands) -> Result<RawSum, EngineError> {
        let mut raw = RawSum::zeroed(operands.len());
        let slots = raw.slots_mut();

        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(operands.len());

            for (index, (slot, (a, b))) in slots.iter_mut().zip(operands.pairs()).enumerate() {
                let mut builder = thread::Builder::new().name(format!("aas-digit-{}", index));
                if let Some(stack_size) = self.stack_size {
                    builder = builder.stack_size(stack_size);
                }

                let handle = builder
                    .spawn_scoped(scope, move || *slot = add_digits(a, b))
                    .map_err(|e| {
                        tracing::error!(index, error = %e, "Could not create digit worker");
                        EngineError::ResourceExhaustion(format!("worker {}: {}", index, e))
                    })?;
                handles.push(handle);
            }

            for (index, handle) in handles.into_iter().enumerate() {
                handle.join().map_err(|payload| {
                    tracing::error!(index, "Could not join digit worker");
                    EngineError::SynchronizationFailure(format!(
                        "worker {}: {}",
                        index,
                        panic_message(payload.as_ref())
                    ))
                })?;
            }

            Ok::<(), EngineError>(())
        })?;

        Ok(raw)
    }
}
