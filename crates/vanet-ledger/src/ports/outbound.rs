//! Outbound (Driven) ports for the accident ledger.
//!
//! These traits define what the ledger needs from its host: somewhere to
//! send signals and a clock.

use async_trait::async_trait;
use shared_types::entities::Timestamp;
use shared_types::events::LedgerEvent;
use std::sync::Arc;

/// Fire-and-forget receiver of ledger signals.
///
/// Emission never fails from the ledger's point of view and is never
/// acknowledged. Implementations must not call back into the ledger.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one signal.
    async fn emit(&self, event: LedgerEvent);
}

#[async_trait]
impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    async fn emit(&self, event: LedgerEvent) {
        (**self).emit(event).await;
    }
}

/// Time source for consistent timestamp handling.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current time in seconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}
