//! # Shared Bus - Event Bus for Ledger Signals
//!
//! Delivers `EntityRegistered`, `AccidentReported` and `SecurityAlert` signals
//! from the ledger to any number of external observers.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Ledger       │                    │ Observer     │
//! │ service      │    publish()       │ (audit, UI)  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! Emission is fire-and-forget: publishing never fails and never blocks the
//! ledger, even when nobody is listening.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::EventFilter;
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use shared_types::events::{EventTopic, LedgerEvent};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Signals buffered per receiver before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
