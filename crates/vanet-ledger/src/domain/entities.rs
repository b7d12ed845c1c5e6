//! # Domain Entities
//!
//! Records stored by the ledger and receipts returned to callers.

use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, Fingerprint, OriginKind, Timestamp};

/// A validated accident report, immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccidentReport {
    /// Sequential id, starting at 0, with no gaps.
    pub id: u64,
    /// Free-text location supplied by the reporter.
    pub location: String,
    /// Insertion time assigned by the ledger.
    pub timestamp: Timestamp,
    /// Reporting address.
    pub reporter: Address,
    /// Machine (vehicle) or human (user) origin.
    pub origin: OriginKind,
    /// Deduplication fingerprint.
    pub fingerprint: Fingerprint,
    /// Digest of the previous record (`Fingerprint::ZERO` for id 0).
    pub prev_digest: Fingerprint,
    /// Digest over this record's fields and `prev_digest`.
    pub digest: Fingerprint,
}

/// Returned to the caller of an accepted `report_accident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportReceipt {
    /// Sequence id of the new record.
    pub id: u64,
    /// Fingerprint marked as processed.
    pub fingerprint: Fingerprint,
    /// Insertion timestamp.
    pub timestamp: Timestamp,
    /// Origin derived from the reporter's registry.
    pub origin: OriginKind,
}

impl From<&AccidentReport> for ReportReceipt {
    fn from(report: &AccidentReport) -> Self {
        Self {
            id: report.id,
            fingerprint: report.fingerprint,
            timestamp: report.timestamp,
            origin: report.origin,
        }
    }
}

/// Registered identity counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityCounts {
    /// Authorized vehicles.
    pub vehicles: u64,
    /// Authorized users.
    pub users: u64,
}
