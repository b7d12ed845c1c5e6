//! # Error Types
//!
//! Every rejection the ledger can produce. A rejected call never leaves a
//! partial state change behind.

use shared_types::entities::{Address, Fingerprint, Role, Timestamp};
use thiserror::Error;

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Operation that requires a specific caller privilege.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedOperation {
    /// `register_vehicle` / `register_user`: authority only.
    Register(Role),
    /// `report_accident`: registered vehicle or user.
    Report,
}

/// Errors returned by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller lacks the role or authority the operation requires.
    #[error("access denied: {caller} may not perform {operation:?}")]
    AccessDenied {
        /// The rejected caller.
        caller: Address,
        /// What the caller attempted.
        operation: GuardedOperation,
    },

    /// Target address already holds the role being granted.
    #[error("address already registered: {address} is already a {role}")]
    AlreadyRegistered {
        /// The address that was already registered.
        address: Address,
        /// The role it already holds.
        role: Role,
    },

    /// Reporter is still inside the cooldown since its last accepted report.
    #[error("rate limited: {reporter} may report again at {retry_at} (now {now})")]
    RateLimited {
        /// The throttled reporter.
        reporter: Address,
        /// Time of the attempt.
        now: Timestamp,
        /// Earliest time the next report is admitted.
        retry_at: Timestamp,
    },

    /// The report's fingerprint has already been processed.
    #[error("duplicate report: fingerprint {0} already processed")]
    DuplicateReport(Fingerprint),

    /// `now` went backwards and the clock policy is `Reject`.
    #[error("clock regression: now {now} is before last accepted report at {last_seen}")]
    ClockRegression {
        /// Time supplied with the call.
        now: Timestamp,
        /// Timestamp of the newest ledger record.
        last_seen: Timestamp,
    },
}

/// Closed classification of [`LedgerError`] for callers that only need the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`LedgerError::AccessDenied`].
    AccessDenied,
    /// See [`LedgerError::AlreadyRegistered`].
    AlreadyRegistered,
    /// See [`LedgerError::RateLimited`].
    RateLimited,
    /// See [`LedgerError::DuplicateReport`].
    DuplicateReport,
    /// See [`LedgerError::ClockRegression`].
    ClockRegression,
}

impl LedgerError {
    /// The error kind without payload.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            Self::RateLimited { .. } => ErrorKind::RateLimited,
            Self::DuplicateReport(_) => ErrorKind::DuplicateReport,
            Self::ClockRegression { .. } => ErrorKind::ClockRegression,
        }
    }

    /// Canonical revert reason, as the on-chain deployment reported it.
    #[must_use]
    pub fn revert_reason(&self) -> &'static str {
        match self {
            Self::AccessDenied {
                operation: GuardedOperation::Register(_),
                ..
            } => "Only Traffic Authority can register",
            Self::AccessDenied {
                operation: GuardedOperation::Report,
                ..
            } => "Access Denied: Not an authorized vehicle or user",
            Self::AlreadyRegistered { .. } => "Address already registered",
            Self::RateLimited { .. } => "Rate Limit: wait before reporting again",
            Self::DuplicateReport(_) => "Duplicate report detected",
            Self::ClockRegression { .. } => "Clock regression",
        }
    }

    /// True for rejections that indicate an attack rather than a benign conflict.
    #[must_use]
    pub fn is_attack_signal(&self) -> bool {
        matches!(
            self,
            Self::AccessDenied { .. } | Self::RateLimited { .. } | Self::DuplicateReport(_)
        )
    }
}

// =============================================================================
// CONFIG ERRORS
// =============================================================================

/// Invalid [`LedgerConfig`](crate::config::LedgerConfig) values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Fingerprint bucket width must be at least one second.
    #[error("fingerprint bucket must be > 0 seconds")]
    ZeroFingerprintBucket,

    /// Unrecognized clock policy name.
    #[error("unknown clock policy: {0} (expected \"reject\" or \"clamp\")")]
    UnknownClockPolicy(String),
}

// =============================================================================
// INTEGRITY ERRORS
// =============================================================================

/// A broken link found while re-walking the record digest chain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// A record's id does not match its position in the log.
    #[error("record at position {position} carries id {id}")]
    IdGap {
        /// Index in the log.
        position: u64,
        /// Id stored in the record.
        id: u64,
    },

    /// A record does not point at the digest of its predecessor.
    #[error("record {id} links to {found}, expected {expected}")]
    BrokenLink {
        /// Offending record.
        id: u64,
        /// Digest of the predecessor.
        expected: Fingerprint,
        /// `prev_digest` stored in the record.
        found: Fingerprint,
    },

    /// A record's stored digest does not match its contents.
    #[error("record {id} digest mismatch")]
    DigestMismatch {
        /// Offending record.
        id: u64,
    },

    /// Timestamps went backwards between consecutive records.
    #[error("record {id} timestamp {timestamp} precedes {previous}")]
    TimestampRegression {
        /// Offending record.
        id: u64,
        /// Its timestamp.
        timestamp: Timestamp,
        /// Timestamp of the preceding record.
        previous: Timestamp,
    },
}

// =============================================================================
// TESTS
// =============================================================================
