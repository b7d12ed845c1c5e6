//! # Domain Layer
//!
//! Pure, synchronous ledger logic. No I/O, no async, no clocks: callers pass
//! `now` in.

pub mod dedup;
pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod registry;
pub mod services;
pub mod state;

pub use dedup::ReportGuard;
pub use entities::{AccidentReport, EntityCounts, ReportReceipt};
pub use invariants::{check_all_invariants, InvariantCheckResult, InvariantViolation};
pub use ledger::AccidentLog;
pub use registry::IdentityRegistry;
pub use services::{compute_fingerprint, keccak256, record_digest, time_bucket, DigestInput};
pub use state::{LedgerSnapshot, LedgerState, Transition};
