//! # Application Layer
//!
//! Service wiring the parallel stage and carry resolution together.

pub mod service;

pub use service::AdditionEngine;
