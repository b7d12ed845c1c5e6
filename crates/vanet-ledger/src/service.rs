//! # Accident Ledger Service
//!
//! Async wrapper around [`LedgerState`] that serializes mutations, stamps them
//! with the current time, and forwards the emitted signals to an [`EventSink`].
//!
//! ## Ordering
//!
//! Mutations take the state write lock and emit their signals before releasing
//! it, so sinks observe signals in the same total order as the state
//! transitions. Reads take the read lock and never wait on one another.

use crate::config::LedgerConfig;
use crate::domain::entities::{AccidentReport, EntityCounts, ReportReceipt};
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::state::{LedgerSnapshot, LedgerState, Transition};
use crate::errors::{ConfigError, ErrorKind, LedgerError};
use crate::ports::inbound::AccidentLedgerApi;
use crate::ports::outbound::{EventSink, TimeSource};

use async_trait::async_trait;
use shared_types::entities::{Address, Role, Timestamp};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Successful registrations.
    pub registrations: u64,
    /// Accepted reports.
    pub reports_accepted: u64,
    /// Calls rejected with `AccessDenied`.
    pub access_denied: u64,
    /// Registrations rejected with `AlreadyRegistered`.
    pub already_registered: u64,
    /// Reports rejected with `RateLimited`.
    pub rate_limited: u64,
    /// Reports rejected with `DuplicateReport`.
    pub duplicates: u64,
    /// Reports rejected with `ClockRegression`.
    pub clock_rejections: u64,
    /// Security alerts emitted.
    pub alerts_emitted: u64,
}

impl ServiceStats {
    fn record<T>(&mut self, transition: &Transition<T>, success: fn(&mut Self)) {
        match &transition.result {
            Ok(_) => success(self),
            Err(err) => match err.kind() {
                ErrorKind::AccessDenied => self.access_denied += 1,
                ErrorKind::AlreadyRegistered => self.already_registered += 1,
                ErrorKind::RateLimited => self.rate_limited += 1,
                ErrorKind::DuplicateReport => self.duplicates += 1,
                ErrorKind::ClockRegression => self.clock_rejections += 1,
            },
        }
        self.alerts_emitted += transition.alerts().count() as u64;
    }

    /// Total rejected calls.
    #[must_use]
    pub fn rejections(&self) -> u64 {
        self.access_denied
            + self.already_registered
            + self.rate_limited
            + self.duplicates
            + self.clock_rejections
    }
}

struct Inner {
    state: LedgerState,
    stats: ServiceStats,
}

/// The accident ledger service.
pub struct AccidentLedgerService<S: EventSink, T: TimeSource> {
    authority: Address,
    inner: RwLock<Inner>,
    sink: S,
    clock: T,
}

impl<S: EventSink, T: TimeSource> AccidentLedgerService<S, T> {
    /// Create a ledger governed by `authority`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(
        authority: Address,
        config: LedgerConfig,
        sink: S,
        clock: T,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            authority = %authority,
            min_interval = config.min_report_interval_secs,
            bucket = config.fingerprint_bucket_secs,
            clock_policy = ?config.clock_policy,
            "Accident ledger created"
        );
        Ok(Self {
            authority,
            inner: RwLock::new(Inner {
                state: LedgerState::new(authority, config),
                stats: ServiceStats::default(),
            }),
            sink,
            clock,
        })
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The time source.
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// Current counters.
    pub async fn stats(&self) -> ServiceStats {
        self.inner.read().await.stats.clone()
    }

    /// Read-only summary.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.inner.read().await.state.snapshot()
    }

    /// Every stored report, in id order.
    pub async fn accidents(&self) -> Vec<AccidentReport> {
        self.inner.read().await.state.accidents().cloned().collect()
    }

    /// Runs every consistency check over the current state.
    pub async fn verify_integrity(&self) -> InvariantCheckResult {
        let inner = self.inner.read().await;
        let result = check_all_invariants(&inner.state);
        if let InvariantCheckResult::Invalid(violations) = &result {
            for v in violations {
                warn!(violation = %v, "Ledger invariant violated");
            }
        }
        result
    }

    /// File a report at an explicit time instead of the clock's.
    #[instrument(skip(self, caller, location), fields(caller = %caller.short()))]
    pub async fn report_accident_at(
        &self,
        caller: Address,
        location: &str,
        now: Timestamp,
    ) -> Result<ReportReceipt, LedgerError> {
        let mut inner = self.inner.write().await;
        let transition = inner.state.report_accident(caller, location, now);
        inner
            .stats
            .record(&transition, |s| s.reports_accepted += 1);

        match &transition.result {
            Ok(receipt) => info!(
                id = receipt.id,
                origin = receipt.origin.label(),
                fingerprint = %receipt.fingerprint,
                "Report accepted"
            ),
            Err(err) if err.is_attack_signal() => warn!(
                error = %err,
                reason = err.revert_reason(),
                "Report rejected"
            ),
            Err(err) => debug!(error = %err, "Report rejected"),
        }

        self.dispatch(transition).await
    }

    #[instrument(
        skip(self, caller, address),
        fields(caller = %caller.short(), address = %address.short(), role = role.label())
    )]
    async fn register(
        &self,
        caller: Address,
        address: Address,
        role: Role,
    ) -> Result<(), LedgerError> {
        let mut inner = self.inner.write().await;
        let transition = match role {
            Role::Vehicle => inner.state.register_vehicle(caller, address),
            Role::User => inner.state.register_user(caller, address),
        };
        inner.stats.record(&transition, |s| s.registrations += 1);

        match &transition.result {
            Ok(()) => info!("Entity registered"),
            Err(err) if err.is_attack_signal() => warn!(
                error = %err,
                reason = err.revert_reason(),
                "Registration rejected"
            ),
            Err(err) => debug!(error = %err, "Registration rejected"),
        }

        self.dispatch(transition).await
    }

    /// Sends every signal of a transition to the sink, then yields its result.
    async fn dispatch<V>(&self, transition: Transition<V>) -> Result<V, LedgerError> {
        let Transition { result, events } = transition;
        for event in events {
            self.sink.emit(event).await;
        }
        result
    }
}

#[async_trait]
impl<S: EventSink, T: TimeSource> AccidentLedgerApi for AccidentLedgerService<S, T> {
    async fn register_vehicle(
        &self,
        caller: Address,
        address: Address,
    ) -> Result<(), LedgerError> {
        self.register(caller, address, Role::Vehicle).await
    }

    async fn register_user(&self, caller: Address, address: Address) -> Result<(), LedgerError> {
        self.register(caller, address, Role::User).await
    }

    async fn report_accident(
        &self,
        caller: Address,
        location: &str,
    ) -> Result<ReportReceipt, LedgerError> {
        let now = self.clock.now();
        self.report_accident_at(caller, location, now).await
    }

    async fn is_authorized_vehicle(&self, address: Address) -> bool {
        self.inner.read().await.state.is_authorized_vehicle(&address)
    }

    async fn is_authorized_user(&self, address: Address) -> bool {
        self.inner.read().await.state.is_authorized_user(&address)
    }

    async fn accident_count(&self) -> u64 {
        self.inner.read().await.state.accident_count()
    }

    async fn entity_counts(&self) -> EntityCounts {
        self.inner.read().await.state.entity_counts()
    }

    fn traffic_authority(&self) -> Address {
        self.authority
    }

    async fn accident(&self, id: u64) -> Option<AccidentReport> {
        self.inner.read().await.state.accident(id).cloned()
    }

    async fn last_report_time(&self, reporter: Address) -> Option<Timestamp> {
        self.inner.read().await.state.last_report_time(&reporter)
    }
}
