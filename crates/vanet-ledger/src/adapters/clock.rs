//! Manually driven clock.

use crate::ports::outbound::TimeSource;
use shared_types::entities::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};

/// A clock that only moves when told to.
///
/// The node simulation uses it to step past the rate-limit cooldown without
/// sleeping.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Starts the clock at `start`.
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Jumps to `at`. Going backwards is allowed; the ledger's clock policy
    /// decides what to make of it.
    pub fn set(&self, at: Timestamp) {
        self.now.store(at, Ordering::SeqCst);
    }

    /// Moves forward by `secs` and returns the new time.
    pub fn advance(&self, secs: u64) -> Timestamp {
        self.now.fetch_add(secs, Ordering::SeqCst).saturating_add(secs)
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.load(Ordering::SeqCst)
    }
}
