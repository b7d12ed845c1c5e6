//! # Ledger Container
//!
//! Builds one ledger instance and everything it talks to.
//!
//! ```text
//! AccidentLedgerService ──emit──► CompositeSink ─┬─► BusEventSink ──► InMemoryEventBus ──► subscribers
//!          ▲                                     └─► TracingEventSink ──► log
//!          │ now()
//!     ManualClock
//! ```

pub mod config;

pub use config::NodeConfig;

use shared_bus::InMemoryEventBus;
use shared_types::entities::{Address, Timestamp};
use std::sync::Arc;
use tracing::info;
use vanet_ledger::adapters::{BusEventSink, CompositeSink, ManualClock, TracingEventSink};
use vanet_ledger::service::AccidentLedgerService;
use vanet_ledger::ConfigError;

/// The concrete ledger type hosted by the node.
pub type NodeLedger = AccidentLedgerService<CompositeSink, Arc<ManualClock>>;

/// A wired ledger node.
pub struct LedgerNode {
    /// Configuration the node was built from.
    pub config: NodeConfig,
    /// Bus carrying every ledger signal.
    pub bus: Arc<InMemoryEventBus>,
    /// Clock driving the ledger.
    pub clock: Arc<ManualClock>,
    /// The ledger itself.
    pub ledger: Arc<NodeLedger>,
}

impl LedgerNode {
    /// Wire a ledger whose clock starts at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the ledger policy is invalid.
    pub fn new(config: NodeConfig, start: Timestamp) -> Result<Self, ConfigError> {
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(ManualClock::new(start));

        let sink = CompositeSink::new()
            .with(Arc::new(BusEventSink::new(bus.clone())))
            .with(Arc::new(TracingEventSink));

        let ledger = Arc::new(AccidentLedgerService::new(
            config.authority,
            config.ledger.clone(),
            sink,
            clock.clone(),
        )?);

        info!(authority = %config.authority, start, "Ledger node wired");

        Ok(Self {
            config,
            bus,
            clock,
            ledger,
        })
    }

    /// The authority of the hosted ledger.
    #[must_use]
    pub fn authority(&self) -> Address {
        self.config.authority
    }
}
