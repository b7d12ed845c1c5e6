//! # Ledger Signals
//!
//! The three signals the ledger emits for external observation. They are a side
//! channel: the state machine never reads them back.
//!
//! Addresses serialize as `0x`-prefixed hex so that JSON audit logs stay readable.

use crate::entities::{Address, AlertKind, Fingerprint, OriginKind, Role, Timestamp};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// A signal emitted by the ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// The authority granted a role to an address.
    EntityRegistered {
        /// The newly authorized address.
        #[serde_as(as = "DisplayFromStr")]
        entity: Address,
        /// Role that was granted.
        role: Role,
    },

    /// A report passed every check and was appended.
    AccidentReported {
        /// Sequence id assigned by the ledger.
        id: u64,
        /// Free-text location supplied by the reporter.
        location: String,
        /// The reporting address.
        #[serde_as(as = "DisplayFromStr")]
        reporter: Address,
        /// Machine or human origin.
        origin: OriginKind,
        /// Deduplication fingerprint of the report.
        fingerprint: Fingerprint,
        /// Ledger-assigned insertion time.
        timestamp: Timestamp,
    },

    /// An operation was denied or flagged as abusive.
    SecurityAlert {
        /// Attack classification.
        kind: AlertKind,
        /// The offending caller.
        #[serde_as(as = "DisplayFromStr")]
        attacker: Address,
    },
}

impl LedgerEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::EntityRegistered { .. } => EventTopic::Registry,
            Self::AccidentReported { .. } => EventTopic::Reports,
            Self::SecurityAlert { .. } => EventTopic::Security,
        }
    }

    /// The address that caused the signal.
    #[must_use]
    pub fn subject(&self) -> Address {
        match self {
            Self::EntityRegistered { entity, .. } => *entity,
            Self::AccidentReported { reporter, .. } => *reporter,
            Self::SecurityAlert { attacker, .. } => *attacker,
        }
    }

    /// Returns true for `SecurityAlert` signals.
    #[must_use]
    pub fn is_alert(&self) -> bool {
        matches!(self, Self::SecurityAlert { .. })
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `EntityRegistered` signals.
    Registry,
    /// `AccidentReported` signals.
    Reports,
    /// `SecurityAlert` signals.
    Security,
    /// All events (no filtering).
    All,
}
