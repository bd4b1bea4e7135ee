//! # MLB K-Model Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── simulation_benchmarks.rs  # Monte-Carlo engine throughput
//! └── src/
//!     ├── fixtures.rs               # A small fixture league on the in-memory API
//!     └── integration/              # Command-level pipeline flows
//!         ├── history.rs            # harvest -> simulate -> calibrate
//!         └── daily.rs              # slate -> project -> cache -> online fit
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p km-tests
//!
//! # By flow
//! cargo test -p km-tests integration::history::
//! cargo test -p km-tests integration::daily::
//!
//! # Benchmarks
//! cargo bench -p km-tests
//! ```

pub mod fixtures;
pub mod integration;
