//! # Domain Services
//!
//! Pure hashing functions behind report fingerprints and ledger record digests.
//!
//! - NO I/O operations
//! - NO async code
//! - Pure functions only

use shared_types::entities::{Address, Fingerprint, OriginKind, Timestamp};
use sha3::{Digest, Keccak256};

/// Keccak-256 of arbitrary bytes.
#[must_use]
pub fn keccak256(data: &[u8]) -> Fingerprint {
    Fingerprint(Keccak256::digest(data).into())
}

/// Maps `now` onto its fingerprint bucket. A width of 1 is the identity.
///
/// A zero width is treated as 1; `LedgerConfig::validate` rejects it up front.
#[must_use]
pub fn time_bucket(now: Timestamp, width_secs: u64) -> u64 {
    now / width_secs.max(1)
}

/// Left-pads a `u64` to a 32-byte big-endian word.
fn word(value: u64) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

/// Computes the deduplication fingerprint of a report.
///
/// `keccak256(reporter ‖ location ‖ word(bucket))`
///
/// The reporter is always part of the preimage, so two senders filing the same
/// location in the same bucket never collide. Both neighbours of the
/// variable-length location are fixed width, so the packing is unambiguous.
#[must_use]
pub fn compute_fingerprint(reporter: &Address, location: &str, bucket: u64) -> Fingerprint {
    let mut hasher = Keccak256::new();
    hasher.update(reporter.as_bytes());
    hasher.update(location.as_bytes());
    hasher.update(word(bucket));
    Fingerprint(hasher.finalize().into())
}

/// Fields of a ledger record covered by its digest.
#[derive(Debug, Clone, Copy)]
pub struct DigestInput<'a> {
    /// Digest of the preceding record, or `Fingerprint::ZERO` for the first.
    pub prev_digest: Fingerprint,
    /// Sequence id.
    pub id: u64,
    /// Insertion timestamp.
    pub timestamp: Timestamp,
    /// Reporting address.
    pub reporter: Address,
    /// Origin classification.
    pub origin: OriginKind,
    /// Report fingerprint.
    pub fingerprint: Fingerprint,
    /// Free-text location.
    pub location: &'a str,
}

/// Computes the chained digest of a ledger record.
#[must_use]
pub fn record_digest(input: &DigestInput<'_>) -> Fingerprint {
    let origin_tag: u8 = match input.origin {
        OriginKind::Machine => 0,
        OriginKind::Human => 1,
    };

    let mut hasher = Keccak256::new();
    hasher.update(input.prev_digest.as_bytes());
    hasher.update(word(input.id));
    hasher.update(word(input.timestamp));
    hasher.update(input.reporter.as_bytes());
    hasher.update([origin_tag]);
    hasher.update(input.fingerprint.as_bytes());
    hasher.update(input.location.as_bytes());
    Fingerprint(hasher.finalize().into())
}
