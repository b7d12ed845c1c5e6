//! # Accident Log
//!
//! Append-only store of validated reports. Each record carries the digest of
//! its predecessor, so any in-place edit breaks the chain and is caught by
//! [`AccidentLog::verify_chain`].

use crate::domain::entities::AccidentReport;
use crate::domain::services::{record_digest, DigestInput};
use crate::errors::ChainError;
use shared_types::entities::{Address, Fingerprint, OriginKind, Timestamp};

/// Sequential report log. Ids start at 0 and have no gaps.
#[derive(Debug, Clone, Default)]
pub struct AccidentLog {
    records: Vec<AccidentReport>,
}

impl AccidentLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a report and returns the stored record.
    ///
    /// Never fails: callers must have passed the access gate and admission
    /// checks already.
    pub fn append(
        &mut self,
        reporter: Address,
        location: &str,
        timestamp: Timestamp,
        origin: OriginKind,
        fingerprint: Fingerprint,
    ) -> &AccidentReport {
        let id = self.records.len() as u64;
        let prev_digest = self.head_digest();
        let digest = record_digest(&DigestInput {
            prev_digest,
            id,
            timestamp,
            reporter,
            origin,
            fingerprint,
            location,
        });

        self.records.push(AccidentReport {
            id,
            location: location.to_string(),
            timestamp,
            reporter,
            origin,
            fingerprint,
            prev_digest,
            digest,
        });
        &self.records[self.records.len() - 1]
    }

    /// Total number of records.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.records.len() as u64
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record by id.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&AccidentReport> {
        usize::try_from(id).ok().and_then(|i| self.records.get(i))
    }

    /// All records in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AccidentReport> {
        self.records.iter()
    }

    /// Digest of the newest record, `Fingerprint::ZERO` when empty.
    #[must_use]
    pub fn head_digest(&self) -> Fingerprint {
        self.records.last().map_or(Fingerprint::ZERO, |r| r.digest)
    }

    /// Timestamp of the newest record.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<Timestamp> {
        self.records.last().map(|r| r.timestamp)
    }

    /// Re-walks every record and recomputes its digest.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        let mut expected_prev = Fingerprint::ZERO;
        let mut previous_ts: Option<Timestamp> = None;

        for (position, record) in self.records.iter().enumerate() {
            let position = position as u64;
            if record.id != position {
                return Err(ChainError::IdGap {
                    position,
                    id: record.id,
                });
            }
            if record.prev_digest != expected_prev {
                return Err(ChainError::BrokenLink {
                    id: record.id,
                    expected: expected_prev,
                    found: record.prev_digest,
                });
            }
            if let Some(previous) = previous_ts {
                if record.timestamp < previous {
                    return Err(ChainError::TimestampRegression {
                        id: record.id,
                        timestamp: record.timestamp,
                        previous,
                    });
                }
            }

            let recomputed = record_digest(&DigestInput {
                prev_digest: record.prev_digest,
                id: record.id,
                timestamp: record.timestamp,
                reporter: record.reporter,
                origin: record.origin,
                fingerprint: record.fingerprint,
                location: &record.location,
            });
            if recomputed != record.digest {
                return Err(ChainError::DigestMismatch { id: record.id });
            }

            expected_prev = record.digest;
            previous_ts = Some(record.timestamp);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn records_mut(&mut self) -> &mut Vec<AccidentReport> {
        &mut self.records
    }
}
