//! # Array Addition Server Test Suite
//!
//! ```text
//! tests/
//! ├── src/integration/  # Real TCP sessions against a bound server
//! └── benches/          # Backend comparison (criterion)
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p aas-tests
//! cargo bench -p aas-tests
//! ```

pub mod integration;
