//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the outbound ports.
//!
//! - `sinks`: where ledger signals go (event bus, log, memory, fan-out)
//! - `clock`: controllable time source for simulations and tests

pub mod clock;
pub mod sinks;

pub use clock::ManualClock;
pub use sinks::{BusEventSink, CompositeSink, NoOpSink, RecordingSink, TracingEventSink};
