//! # Subscriptions
//!
//! Filtering happens on receive, so every observer sees the ledger's signals in
//! the same total order. A receiver that falls more than the channel capacity
//! behind loses the oldest signals; those are counted in `missed()` so an
//! audit observer knows its view has a gap.

use crate::events::EventFilter;
use shared_types::events::LedgerEvent;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::warn;

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The event bus was dropped.
    #[error("Event bus closed")]
    Closed,
}

/// Pull-style handle on the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<LedgerEvent>,
    filter: EventFilter,
    missed: u64,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<LedgerEvent>, filter: EventFilter) -> Self {
        Self {
            receiver,
            filter,
            missed: 0,
        }
    }

    /// Next matching signal, or `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<LedgerEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => self.record_lag(n),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching signal if one is already buffered.
    ///
    /// # Errors
    ///
    /// [`SubscriptionError::Closed`] once the bus is gone and drained.
    pub fn try_recv(&mut self) -> Result<Option<LedgerEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(n)) => self.record_lag(n),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    /// Signals dropped because this subscription lagged.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// Turn this subscription into a [`Stream`]. Signals already buffered
    /// are kept.
    #[must_use]
    pub fn into_stream(self) -> EventStream {
        EventStream {
            inner: BroadcastStream::new(self.receiver),
            filter: self.filter,
            missed: self.missed,
        }
    }

    fn record_lag(&mut self, n: u64) {
        self.missed += n;
        warn!(lagged = n, "Bus subscriber lagged, signals lost");
    }
}

/// Filtered stream of ledger signals. Ends when the bus is dropped.
pub struct EventStream {
    inner: BroadcastStream<LedgerEvent>,
    filter: EventFilter,
    missed: u64,
}

impl EventStream {
    /// The filter applied to this stream.
    #[must_use]
    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    /// Signals dropped because this stream lagged.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }
}

impl Stream for EventStream {
    type Item = LedgerEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match ready!(Pin::new(&mut this.inner).poll_next(cx)) {
                Some(Ok(event)) if this.filter.matches(&event) => {
                    return Poll::Ready(Some(event))
                }
                Some(Ok(_)) => {}
                Some(Err(BroadcastStreamRecvError::Lagged(n))) => {
                    this.missed += n;
                    warn!(lagged = n, "Bus stream lagged, signals lost");
                }
                None => return Poll::Ready(None),
            }
        }
    }
}
