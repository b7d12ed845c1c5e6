//! # Ledger State Machine
//!
//! Single owned state object combining the identity registry, the report guard
//! and the accident log. Every mutating operation takes the caller and `now`
//! explicitly and returns a [`Transition`]: the outcome plus the signals the
//! call produced, in emission order.
//!
//! ## Per-call flow
//!
//! ```text
//! register_*:      authority gate ──► registry write ──► EntityRegistered
//!                       │ deny
//!                       └──► SecurityAlert{Sybil}
//!
//! report_accident: role gate ──► clock policy ──► guard.admit ──► log.append ──► AccidentReported
//!                     │ deny                         │ reject
//!                     └──► SecurityAlert{Impersonation}
//!                                                    └──► SecurityAlert{Spam} (if enabled)
//! ```
//!
//! A rejected call leaves the state untouched.

use crate::config::{ClockPolicy, LedgerConfig};
use crate::domain::dedup::ReportGuard;
use crate::domain::entities::{AccidentReport, EntityCounts, ReportReceipt};
use crate::domain::ledger::AccidentLog;
use crate::domain::registry::IdentityRegistry;
use crate::errors::{ChainError, GuardedOperation, LedgerError};
use serde::{Deserialize, Serialize};
use shared_types::entities::{Address, AlertKind, Fingerprint, OriginKind, Role, Timestamp};
use shared_types::events::LedgerEvent;

/// Outcome of a mutating call together with the signals it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Transition<T> {
    /// Success value or the rejection.
    pub result: Result<T, LedgerError>,
    /// Signals in emission order. May be non-empty on failure (alerts).
    pub events: Vec<LedgerEvent>,
}

impl<T> Transition<T> {
    fn ok(value: T, event: LedgerEvent) -> Self {
        Self {
            result: Ok(value),
            events: vec![event],
        }
    }

    fn rejected(err: LedgerError) -> Self {
        Self {
            result: Err(err),
            events: Vec::new(),
        }
    }

    fn alerted(err: LedgerError, kind: AlertKind, attacker: Address) -> Self {
        Self {
            result: Err(err),
            events: vec![LedgerEvent::SecurityAlert { kind, attacker }],
        }
    }

    /// Whether the call was accepted.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Alert signals only.
    pub fn alerts(&self) -> impl Iterator<Item = &LedgerEvent> {
        self.events.iter().filter(|e| e.is_alert())
    }
}

/// Read-only summary of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The authority address.
    pub authority: Address,
    /// Registered identity counts.
    pub entities: EntityCounts,
    /// Number of accepted reports.
    pub accident_count: u64,
    /// Number of processed fingerprints.
    pub processed_fingerprints: u64,
    /// Digest of the newest record.
    pub head_digest: Fingerprint,
    /// Timestamp of the newest record.
    pub latest_timestamp: Option<Timestamp>,
}

/// The accident ledger state machine.
#[derive(Debug, Clone)]
pub struct LedgerState {
    config: LedgerConfig,
    registry: IdentityRegistry,
    guard: ReportGuard,
    log: AccidentLog,
}

impl LedgerState {
    /// Creates an empty ledger governed by `authority`.
    #[must_use]
    pub fn new(authority: Address, config: LedgerConfig) -> Self {
        let guard = ReportGuard::new(
            config.min_report_interval_secs,
            config.fingerprint_bucket_secs,
        );
        Self {
            config,
            registry: IdentityRegistry::new(authority),
            guard,
            log: AccidentLog::new(),
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Registers `address` as an authorized vehicle.
    pub fn register_vehicle(&mut self, caller: Address, address: Address) -> Transition<()> {
        self.register(caller, address, Role::Vehicle)
    }

    /// Registers `address` as an authorized user.
    pub fn register_user(&mut self, caller: Address, address: Address) -> Transition<()> {
        self.register(caller, address, Role::User)
    }

    fn register(&mut self, caller: Address, address: Address, role: Role) -> Transition<()> {
        match self.registry.register(caller, address, role) {
            Ok(()) => Transition::ok(
                (),
                LedgerEvent::EntityRegistered {
                    entity: address,
                    role,
                },
            ),
            Err(err @ LedgerError::AccessDenied { .. }) => {
                Transition::alerted(err, AlertKind::Sybil, caller)
            }
            Err(err) => Transition::rejected(err),
        }
    }

    /// Files an accident report on behalf of `caller` at `now`.
    pub fn report_accident(
        &mut self,
        caller: Address,
        location: &str,
        now: Timestamp,
    ) -> Transition<ReportReceipt> {
        let Some(origin) = self.registry.origin_of(&caller) else {
            return Transition::alerted(
                LedgerError::AccessDenied {
                    caller,
                    operation: GuardedOperation::Report,
                },
                AlertKind::Impersonation,
                caller,
            );
        };

        let now = match self.effective_now(now) {
            Ok(now) => now,
            Err(err) => return Transition::rejected(err),
        };

        let fingerprint = match self.guard.admit(caller, location, now) {
            Ok(fp) => fp,
            Err(err) if self.config.alert_on_spam => {
                return Transition::alerted(err, AlertKind::Spam, caller)
            }
            Err(err) => return Transition::rejected(err),
        };

        let record = self
            .log
            .append(caller, location, now, origin, fingerprint);
        let receipt = ReportReceipt::from(record);
        let event = LedgerEvent::AccidentReported {
            id: record.id,
            location: record.location.clone(),
            reporter: caller,
            origin,
            fingerprint,
            timestamp: record.timestamp,
        };
        Transition::ok(receipt, event)
    }

    /// Applies the clock policy against the newest record's timestamp.
    fn effective_now(&self, now: Timestamp) -> Result<Timestamp, LedgerError> {
        match self.log.latest_timestamp() {
            Some(last_seen) if now < last_seen => match self.config.clock_policy {
                ClockPolicy::Reject => Err(LedgerError::ClockRegression { now, last_seen }),
                ClockPolicy::Clamp => Ok(last_seen),
            },
            _ => Ok(now),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// The authority fixed at creation.
    #[must_use]
    pub fn traffic_authority(&self) -> Address {
        self.registry.authority()
    }

    /// Whether `address` is an authorized vehicle.
    #[must_use]
    pub fn is_authorized_vehicle(&self, address: &Address) -> bool {
        self.registry.is_authorized_vehicle(address)
    }

    /// Whether `address` is an authorized user.
    #[must_use]
    pub fn is_authorized_user(&self, address: &Address) -> bool {
        self.registry.is_authorized_user(address)
    }

    /// Origin a report from `address` would carry.
    #[must_use]
    pub fn origin_of(&self, address: &Address) -> Option<OriginKind> {
        self.registry.origin_of(address)
    }

    /// Number of accepted reports.
    #[must_use]
    pub fn accident_count(&self) -> u64 {
        self.log.count()
    }

    /// Registered (vehicles, users).
    #[must_use]
    pub fn entity_counts(&self) -> EntityCounts {
        self.registry.counts()
    }

    /// Registered vehicles.
    #[must_use]
    pub fn vehicle_count(&self) -> u64 {
        self.registry.counts().vehicles
    }

    /// Registered users.
    #[must_use]
    pub fn user_count(&self) -> u64 {
        self.registry.counts().users
    }

    /// Stored report by id.
    #[must_use]
    pub fn accident(&self, id: u64) -> Option<&AccidentReport> {
        self.log.get(id)
    }

    /// All reports in id order.
    pub fn accidents(&self) -> impl Iterator<Item = &AccidentReport> {
        self.log.iter()
    }

    /// Last accepted report time of `reporter`.
    #[must_use]
    pub fn last_report_time(&self, reporter: &Address) -> Option<Timestamp> {
        self.guard.last_report_time(reporter)
    }

    /// Whether `fingerprint` has been processed.
    #[must_use]
    pub fn is_processed(&self, fingerprint: &Fingerprint) -> bool {
        self.guard.is_processed(fingerprint)
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Read-only summary.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            authority: self.traffic_authority(),
            entities: self.entity_counts(),
            accident_count: self.accident_count(),
            processed_fingerprints: self.guard.processed_count() as u64,
            head_digest: self.log.head_digest(),
            latest_timestamp: self.log.latest_timestamp(),
        }
    }

    /// Re-walks the record digest chain.
    ///
    /// # Errors
    ///
    /// Returns the first broken link.
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        self.log.verify_chain()
    }

    pub(crate) fn guard(&self) -> &ReportGuard {
        &self.guard
    }

    pub(crate) fn log(&self) -> &AccidentLog {
        &self.log
    }

    #[cfg(test)]
    pub(crate) fn log_mut(&mut self) -> &mut AccidentLog {
        &mut self.log
    }
}
