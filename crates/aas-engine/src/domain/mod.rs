//! # Domain Module
//!
//! Core types for bounded-base addition: digits, digit sequences, the raw
//! per-position sums produced by the parallel stage, and the resolved result.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
