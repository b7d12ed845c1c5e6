//! # VANET Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared actors and ledger builders
//! │
//! ├── exploits/         # Attack simulations
//! │   ├── impersonation.rs
//! │   ├── sybil.rs
//! │   ├── spam.rs
//! │   └── clock_skew.rs
//! │
//! └── integration/      # End-to-end flows
//!     ├── flows.rs
//!     └── simulation.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p vanet-tests
//!
//! # By category
//! cargo test -p vanet-tests integration::
//! cargo test -p vanet-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p vanet-tests
//! ```

#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
