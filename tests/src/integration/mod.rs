//! # Integration Tests
//!
//! - `sessions` - full client dialogues over TCP
//! - `arithmetic` - backends against each other on randomized operands

pub mod arithmetic;
pub mod sessions;
