//! Event sink adapters.
//!
//! | Sink | Destination |
//! |------|-------------|
//! | [`BusEventSink`] | shared in-memory event bus |
//! | [`TracingEventSink`] | structured log lines (alerts at WARN) |
//! | [`RecordingSink`] | in-memory list, for assertions |
//! | [`CompositeSink`] | fan-out to several sinks |
//! | [`NoOpSink`] | nowhere |

use crate::ports::outbound::EventSink;
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_bus::{EventPublisher, InMemoryEventBus};
use shared_types::events::LedgerEvent;
use std::sync::Arc;
use tracing::{info, warn};

// =============================================================================
// BUS
// =============================================================================

/// Publishes every signal to the shared event bus.
#[derive(Clone)]
pub struct BusEventSink {
    bus: Arc<InMemoryEventBus>,
}

impl BusEventSink {
    /// Wraps a shared bus.
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    /// The underlying bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }
}

#[async_trait]
impl EventSink for BusEventSink {
    async fn emit(&self, event: LedgerEvent) {
        self.bus.publish(event).await;
    }
}

// =============================================================================
// TRACING
// =============================================================================

/// Writes each signal as a JSON payload on the `vanet::events` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn emit(&self, event: LedgerEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(e) => {
                warn!(target: "vanet::events", error = %e, "Failed to serialize event");
                return;
            }
        };

        match &event {
            LedgerEvent::SecurityAlert { kind, attacker } => warn!(
                target: "vanet::events",
                alert = kind.label(),
                attacker = %attacker,
                %payload,
                "[ALERT] Security alert raised"
            ),
            LedgerEvent::AccidentReported { id, origin, .. } => info!(
                target: "vanet::events",
                id,
                origin = origin.label(),
                %payload,
                "Accident reported"
            ),
            LedgerEvent::EntityRegistered { entity, role } => info!(
                target: "vanet::events",
                entity = %entity,
                role = role.label(),
                %payload,
                "Entity registered"
            ),
        }
    }
}

// =============================================================================
// RECORDING
// =============================================================================

/// Keeps every signal in memory in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<LedgerEvent>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().clone()
    }

    /// Only the security alerts.
    #[must_use]
    pub fn alerts(&self) -> Vec<LedgerEvent> {
        self.events
            .lock()
            .iter()
            .filter(|e| e.is_alert())
            .cloned()
            .collect()
    }

    /// Number of recorded signals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drains and returns the recorded signals.
    pub fn take(&self) -> Vec<LedgerEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn emit(&self, event: LedgerEvent) {
        self.events.lock().push(event);
    }
}

// =============================================================================
// COMPOSITE / NO-OP
// =============================================================================

/// Forwards each signal to every inner sink, in order.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn EventSink>>,
}

impl CompositeSink {
    /// Creates an empty fan-out.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink.
    #[must_use]
    pub fn with(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Number of inner sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Whether there are no inner sinks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl EventSink for CompositeSink {
    async fn emit(&self, event: LedgerEvent) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Discards every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

#[async_trait]
impl EventSink for NoOpSink {
    async fn emit(&self, _event: LedgerEvent) {}
}
