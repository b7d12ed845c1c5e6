//! # VANET Ledger - Accident Report State Machine
//!
//! **Status:** Production-Ready
//!
//! ## Purpose
//!
//! A shared, tamper-evident ledger of accident reports filed by vehicles and
//! human users of a vehicular network. The ledger resists three attacks:
//!
//! | Attack | Defense | Signal |
//! |--------|---------|--------|
//! | Impersonation | Only registered vehicles/users may report | `SecurityAlert{Impersonation}` |
//! | Sybil | Only the traffic authority may register identities | `SecurityAlert{Sybil}` |
//! | Spam / replay | Per-sender cooldown, then permanent fingerprint dedup | `SecurityAlert{Spam}` |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Exactly one authority, fixed at creation | `domain/registry.rs` - `IdentityRegistry::new()` |
//! | Registration is write-once per role | `domain/registry.rs` - `IdentityRegistry::register()` |
//! | Report ids sequential from 0, no gaps | `domain/ledger.rs` - `AccidentLog::append()` |
//! | Processed fingerprints never reprocessed | `domain/dedup.rs` - `ReportGuard::admit()` |
//! | `LastReportTime` only increases | `domain/dedup.rs` - `ReportGuard::admit()` |
//! | Rejected calls leave no partial state | `domain/state.rs` - `LedgerState` |
//! | Records are tamper-evident | `domain/ledger.rs` - `AccidentLog::verify_chain()` |
//!
//! ## Check Order for `report_accident`
//!
//! 1. Role gate (vehicle or user) - else `AccessDenied`
//! 2. Clock policy (clamp or reject a `now` older than the newest record)
//! 3. Rate limit - else `RateLimited`
//! 4. Fingerprint dedup - else `DuplicateReport`
//! 5. Append and emit `AccidentReported`
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `EventSink` | Fire-and-forget signal delivery |
//! | `TimeSource` | Current time in seconds |
//!
//! ## Usage Example
//!
//! ```ignore
//! use vanet_ledger::prelude::*;
//!
//! let ledger = AccidentLedgerService::new(authority, LedgerConfig::default(), sink, SystemTimeSource)?;
//! ledger.register_vehicle(authority, vehicle).await?;
//! let receipt = ledger.report_accident(vehicle, "Hwy 101 exit 4").await?;
//! println!("report #{} fingerprint {}", receipt.id, receipt.fingerprint);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use config::{ClockPolicy, LedgerConfig};
pub use errors::{ChainError, ConfigError, ErrorKind, GuardedOperation, LedgerError};

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Shared primitives
    pub use shared_types::entities::{Address, AlertKind, Fingerprint, OriginKind, Role, Timestamp};
    pub use shared_types::events::{EventTopic, LedgerEvent};

    // Domain
    pub use crate::domain::entities::{AccidentReport, EntityCounts, ReportReceipt};
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };
    pub use crate::domain::services::{compute_fingerprint, keccak256, time_bucket};
    pub use crate::domain::state::{LedgerSnapshot, LedgerState, Transition};

    // Ports
    pub use crate::ports::inbound::AccidentLedgerApi;
    pub use crate::ports::outbound::{EventSink, SystemTimeSource, TimeSource};

    // Adapters
    pub use crate::adapters::{
        BusEventSink, CompositeSink, ManualClock, NoOpSink, RecordingSink, TracingEventSink,
    };

    // Config & errors
    pub use crate::config::{ClockPolicy, LedgerConfig};
    pub use crate::errors::{ChainError, ConfigError, ErrorKind, GuardedOperation, LedgerError};

    // Service
    pub use crate::service::{AccidentLedgerService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
