//! # Domain Invariants
//!
//! Consistency checks over a [`LedgerState`]. They should hold after every
//! call; the service runs them on demand through `verify_integrity`.
//!
//! - Record ids are `0..count` with no gaps.
//! - The digest chain is intact and timestamps never go backwards.
//! - Every stored report's fingerprint is marked processed, one per record.
//! - Every report's origin matches a role its reporter holds.
//! - No sender's last report time is ahead of the newest record.

use crate::domain::state::LedgerState;
use crate::errors::ChainError;
use shared_types::entities::{Address, OriginKind, Timestamp};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Record ids are strictly sequential from zero.
#[must_use]
pub fn check_sequential_ids(state: &LedgerState) -> bool {
    state
        .accidents()
        .enumerate()
        .all(|(i, r)| r.id == i as u64)
}

/// The digest chain re-verifies.
///
/// # Errors
///
/// Returns the first broken link.
pub fn check_chain(state: &LedgerState) -> Result<(), ChainError> {
    state.log().verify_chain()
}

/// One processed fingerprint per stored report, and each is recorded.
#[must_use]
pub fn check_fingerprints_recorded(state: &LedgerState) -> bool {
    let guard = state.guard();
    guard.processed_count() as u64 == state.accident_count()
        && state.accidents().all(|r| guard.is_processed(&r.fingerprint))
}

/// Reports only originate from holders of the matching role.
#[must_use]
pub fn check_origins(state: &LedgerState) -> Vec<u64> {
    state
        .accidents()
        .filter(|r| match r.origin {
            OriginKind::Machine => !state.is_authorized_vehicle(&r.reporter),
            OriginKind::Human => !state.is_authorized_user(&r.reporter),
        })
        .map(|r| r.id)
        .collect()
}

/// Last report times never exceed the newest record's timestamp.
#[must_use]
pub fn check_last_report_times(state: &LedgerState) -> Vec<(Address, Timestamp)> {
    let ceiling = state.log().latest_timestamp();
    state
        .guard()
        .last_reports()
        .filter(|(_, &t)| ceiling.map_or(true, |c| t > c))
        .map(|(a, &t)| (*a, t))
        .collect()
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_sequential_ids(state) {
        violations.push(InvariantViolation::NonSequentialIds);
    }

    if let Err(err) = check_chain(state) {
        violations.push(InvariantViolation::BrokenChain(err));
    }

    if !check_fingerprints_recorded(state) {
        violations.push(InvariantViolation::FingerprintMismatch {
            processed: state.guard().processed_count() as u64,
            records: state.accident_count(),
        });
    }

    for id in check_origins(state) {
        violations.push(InvariantViolation::OriginWithoutRole { id });
    }

    for (reporter, at) in check_last_report_times(state) {
        violations.push(InvariantViolation::LastReportAhead { reporter, at });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Ids have a gap or are out of order.
    NonSequentialIds,
    /// The digest chain failed verification.
    BrokenChain(ChainError),
    /// Processed fingerprints and stored reports disagree.
    FingerprintMismatch {
        /// Processed fingerprint count.
        processed: u64,
        /// Stored report count.
        records: u64,
    },
    /// A report's origin is not backed by a registry role.
    OriginWithoutRole {
        /// Offending report.
        id: u64,
    },
    /// A sender's last report time is later than every stored report.
    LastReportAhead {
        /// The sender.
        reporter: Address,
        /// Its recorded last report time.
        at: Timestamp,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonSequentialIds => write!(f, "report ids are not sequential"),
            Self::BrokenChain(err) => write!(f, "digest chain broken: {err}"),
            Self::FingerprintMismatch { processed, records } => {
                write!(
                    f,
                    "fingerprint mismatch: {processed} processed, {records} records"
                )
            }
            Self::OriginWithoutRole { id } => {
                write!(f, "report {id} origin not backed by a role")
            }
            Self::LastReportAhead { reporter, at } => {
                write!(f, "last report of {reporter} at {at} is ahead of the log")
            }
        }
    }
}
