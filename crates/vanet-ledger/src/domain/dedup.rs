//! # Report Deduplication & Rate Limiting
//!
//! Admission control for reports from already-authorized senders.
//!
//! Checks run in a fixed order:
//! 1. Rate limit: a sender inside its cooldown is rejected regardless of content.
//! 2. Duplicate: a fingerprint seen before is rejected forever.
//!
//! The rate check goes first so that varying the content of each call does not
//! bypass the cooldown.

use crate::domain::services::{compute_fingerprint, time_bucket};
use crate::errors::LedgerError;
use shared_types::entities::{Address, Fingerprint, Timestamp};
use std::collections::{HashMap, HashSet};

/// Fingerprint memory plus per-sender last accepted report time.
#[derive(Debug, Clone)]
pub struct ReportGuard {
    min_interval_secs: u64,
    bucket_secs: u64,
    /// Append-only; never evicted.
    processed: HashSet<Fingerprint>,
    last_report: HashMap<Address, Timestamp>,
}

impl ReportGuard {
    /// Creates a guard with the given cooldown and fingerprint bucket width.
    #[must_use]
    pub fn new(min_interval_secs: u64, bucket_secs: u64) -> Self {
        Self {
            min_interval_secs,
            bucket_secs: bucket_secs.max(1),
            processed: HashSet::new(),
            last_report: HashMap::new(),
        }
    }

    /// Fingerprint the report would carry at `now`.
    #[must_use]
    pub fn fingerprint(&self, reporter: &Address, location: &str, now: Timestamp) -> Fingerprint {
        compute_fingerprint(reporter, location, time_bucket(now, self.bucket_secs))
    }

    /// Runs both checks and, on success, records the report.
    ///
    /// # Errors
    ///
    /// - `RateLimited` if the reporter's cooldown has not elapsed.
    /// - `DuplicateReport` if the fingerprint was already processed.
    ///
    /// Neither failure mutates the guard.
    pub fn admit(
        &mut self,
        reporter: Address,
        location: &str,
        now: Timestamp,
    ) -> Result<Fingerprint, LedgerError> {
        // No previous report means no cooldown.
        if let Some(&last) = self.last_report.get(&reporter) {
            let retry_at = last.saturating_add(self.min_interval_secs);
            if now < retry_at {
                return Err(LedgerError::RateLimited {
                    reporter,
                    now,
                    retry_at,
                });
            }
        }

        let fingerprint = self.fingerprint(&reporter, location, now);
        if self.processed.contains(&fingerprint) {
            return Err(LedgerError::DuplicateReport(fingerprint));
        }

        self.processed.insert(fingerprint);
        let last = self.last_report.entry(reporter).or_insert(now);
        *last = (*last).max(now);
        Ok(fingerprint)
    }

    /// Last accepted report time for `reporter`.
    #[must_use]
    pub fn last_report_time(&self, reporter: &Address) -> Option<Timestamp> {
        self.last_report.get(reporter).copied()
    }

    /// Whether `fingerprint` has been processed.
    #[must_use]
    pub fn is_processed(&self, fingerprint: &Fingerprint) -> bool {
        self.processed.contains(fingerprint)
    }

    /// Number of processed fingerprints.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Configured cooldown.
    #[must_use]
    pub fn min_interval_secs(&self) -> u64 {
        self.min_interval_secs
    }

    /// Iterates over every tracked sender and its last accepted report time.
    pub fn last_reports(&self) -> impl Iterator<Item = (&Address, &Timestamp)> {
        self.last_report.iter()
    }
}
