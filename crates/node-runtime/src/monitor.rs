//! # Alert Monitor
//!
//! Watches the bus for security alerts while the ledger runs and tallies them
//! by kind. The watch ends when the bus is dropped.

use shared_bus::{EventFilter, EventStream, InMemoryEventBus};
use shared_types::entities::AlertKind;
use shared_types::events::LedgerEvent;
use std::collections::HashMap;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::info;

/// Alerts seen on the bus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertTally {
    counts: HashMap<AlertKind, u64>,
    /// Signals lost because the monitor lagged behind the bus.
    pub missed: u64,
}

impl AlertTally {
    /// Alerts of one kind.
    #[must_use]
    pub fn count(&self, kind: AlertKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Alerts of every kind.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Subscribe to alerts now and watch them on a background task.
#[must_use]
pub fn spawn_alert_monitor(bus: &InMemoryEventBus) -> JoinHandle<AlertTally> {
    tokio::spawn(watch_alerts(bus.event_stream(EventFilter::alerts())))
}

/// Drain `alerts` until the bus closes.
pub async fn watch_alerts(mut alerts: EventStream) -> AlertTally {
    let mut tally = AlertTally::default();
    while let Some(event) = alerts.next().await {
        if let LedgerEvent::SecurityAlert { kind, attacker } = event {
            info!(alert = kind.label(), attacker = %attacker.short(), "Alert observed on bus");
            *tally.counts.entry(kind).or_default() += 1;
        }
    }
    tally.missed = alerts.missed();
    tally
}
