//! # Test Fixtures
//!
//! Deterministic actors and pre-wired ledgers shared by every test module.

use std::sync::Arc;

use shared_types::entities::{Address, Timestamp};
use vanet_ledger::adapters::{ManualClock, RecordingSink};
use vanet_ledger::service::AccidentLedgerService;
use vanet_ledger::LedgerConfig;

/// Clock start for every fixture ledger.
pub const T0: Timestamp = 1_700_000_000;

/// Ledger wired to an in-memory recorder and a manual clock.
pub type TestLedger = AccidentLedgerService<Arc<RecordingSink>, Arc<ManualClock>>;

/// The traffic authority.
pub fn authority() -> Address {
    Address::repeat_byte(0xA0)
}

/// A vehicle the authority registers.
pub fn vehicle() -> Address {
    Address::repeat_byte(0x01)
}

/// A user the authority registers.
pub fn user() -> Address {
    Address::repeat_byte(0x02)
}

/// An address nobody registers.
pub fn attacker() -> Address {
    Address::repeat_byte(0xEE)
}

/// A ledger, its recorder and its clock.
pub struct Harness {
    pub ledger: TestLedger,
    pub sink: Arc<RecordingSink>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    /// Empty ledger with `config`.
    pub fn with_config(config: LedgerConfig) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let clock = Arc::new(ManualClock::new(T0));
        let ledger = AccidentLedgerService::new(authority(), config, sink.clone(), clock.clone())
            .expect("valid config");
        Self {
            ledger,
            sink,
            clock,
        }
    }

    /// Empty ledger with the default policy.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    /// Default ledger with [`vehicle`] and [`user`] registered and the
    /// registration signals cleared from the recorder.
    pub async fn registered() -> Self {
        use vanet_ledger::ports::inbound::AccidentLedgerApi;

        let h = Self::new();
        h.ledger
            .register_vehicle(authority(), vehicle())
            .await
            .expect("register vehicle");
        h.ledger
            .register_user(authority(), user())
            .await
            .expect("register user");
        h.sink.take();
        h
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}
