//! # Ledger Configuration
//!
//! Policy constants for rate limiting, fingerprinting and clock handling.
//! All values have sane defaults; the node runtime may override them from the
//! environment.

use crate::errors::ConfigError;
use std::str::FromStr;

/// Default cooldown between accepted reports from one sender (seconds).
pub const DEFAULT_MIN_REPORT_INTERVAL_SECS: u64 = 60;

/// Default fingerprint bucket width (seconds). One means the raw timestamp.
pub const DEFAULT_FINGERPRINT_BUCKET_SECS: u64 = 1;

/// What to do when a report arrives with a `now` earlier than the newest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockPolicy {
    /// Fail the call with `ClockRegression`.
    Reject,
    /// Treat the call as happening at the newest record's timestamp.
    #[default]
    Clamp,
}

impl FromStr for ClockPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "clamp" => Ok(Self::Clamp),
            other => Err(ConfigError::UnknownClockPolicy(other.to_string())),
        }
    }
}

/// Ledger policy configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Minimum seconds between two accepted reports from the same address.
    pub min_report_interval_secs: u64,
    /// Width of the time bucket folded into report fingerprints.
    pub fingerprint_bucket_secs: u64,
    /// Handling of non-monotonic `now`.
    pub clock_policy: ClockPolicy,
    /// Emit `SecurityAlert{Spam}` alongside `RateLimited` / `DuplicateReport`.
    pub alert_on_spam: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_report_interval_secs: DEFAULT_MIN_REPORT_INTERVAL_SECS,
            fingerprint_bucket_secs: DEFAULT_FINGERPRINT_BUCKET_SECS,
            clock_policy: ClockPolicy::default(),
            alert_on_spam: true,
        }
    }
}

impl LedgerConfig {
    /// Validate configuration before building a ledger.
    ///
    /// # Errors
    ///
    /// Returns `ZeroFingerprintBucket` if the bucket width is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fingerprint_bucket_secs == 0 {
            return Err(ConfigError::ZeroFingerprintBucket);
        }
        Ok(())
    }
}
