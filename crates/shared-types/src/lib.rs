//! # Shared Types Crate
//!
//! Identity primitives and ledger signals shared across the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `Fingerprint`, roles and the
//!   `LedgerEvent` signal enum are defined here and nowhere else.
//! - **Caller Identity Is Trusted Input**: the transport authenticates callers;
//!   payloads never carry a second, self-declared identity.

pub mod entities;
pub mod errors;
pub mod events;

pub use entities::*;
pub use errors::*;
pub use events::*;
