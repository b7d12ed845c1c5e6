//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the ledger and the outside world.
//!
//! - **Driving Ports (Inbound)**: `AccidentLedgerApi`
//! - **Driven Ports (Outbound)**: `EventSink`, `TimeSource`
//! - No concrete implementations here beyond `SystemTimeSource`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
