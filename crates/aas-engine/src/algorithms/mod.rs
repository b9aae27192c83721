//! # Algorithms Module
//!
//! Per-digit addition, carry resolution and the sequential reference adder.

pub mod carry_resolver;
pub mod digit_adder;
pub mod sequential;

pub use carry_resolver::resolve_carries;
pub use digit_adder::add_digits;
pub use sequential::add_sequential;
