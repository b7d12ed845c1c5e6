//! # Node Runtime Library
//!
//! Exposes the node's wiring and simulation for testing. The main entry point
//! is the `main.rs` binary.
//!
//! - `container/` - configuration and ledger wiring
//! - `monitor` - live security-alert watcher on the bus
//! - `simulation` - the six-scenario attack run

#![warn(missing_docs)]
#![allow(clippy::too_many_lines)]

pub mod container;
pub mod monitor;
pub mod simulation;

pub use container::{LedgerNode, NodeConfig, NodeLedger};
pub use monitor::{spawn_alert_monitor, AlertTally};
pub use simulation::{run_simulation, Actors, SimulationReport, EXPECTED_REPORTS};
