//! # Driving Ports (API - Inbound)
//!
//! The ledger's public entry points. The transport layer authenticates the
//! caller and hands its address in; the current time comes from the service's
//! [`TimeSource`](super::outbound::TimeSource).

use crate::domain::entities::{AccidentReport, EntityCounts, ReportReceipt};
use crate::errors::LedgerError;
use async_trait::async_trait;
use shared_types::entities::{Address, Timestamp};

// =============================================================================
// ACCIDENT LEDGER API (Primary Driving Port)
// =============================================================================

/// Primary API of the accident ledger.
///
/// | Operation | Caller constraint |
/// |-----------|-------------------|
/// | `register_vehicle`, `register_user` | authority only |
/// | `report_accident` | authorized vehicle or user |
/// | everything else | any |
///
/// ## Usage
///
/// ```ignore
/// api.register_vehicle(authority, vehicle).await?;
/// let receipt = api.report_accident(vehicle, "Hwy 101 exit 4").await?;
/// ```
#[async_trait]
pub trait AccidentLedgerApi: Send + Sync {
    /// Grant the vehicle role to `address`.
    ///
    /// # Errors
    ///
    /// `AccessDenied` for a non-authority caller, `AlreadyRegistered` if
    /// `address` already is a vehicle.
    async fn register_vehicle(&self, caller: Address, address: Address)
        -> Result<(), LedgerError>;

    /// Grant the user role to `address`.
    ///
    /// # Errors
    ///
    /// Same as [`register_vehicle`](Self::register_vehicle).
    async fn register_user(&self, caller: Address, address: Address) -> Result<(), LedgerError>;

    /// File an accident report.
    ///
    /// # Errors
    ///
    /// `AccessDenied`, `RateLimited`, `DuplicateReport`, or
    /// `ClockRegression` under the reject clock policy.
    async fn report_accident(
        &self,
        caller: Address,
        location: &str,
    ) -> Result<ReportReceipt, LedgerError>;

    /// Whether `address` is an authorized vehicle.
    async fn is_authorized_vehicle(&self, address: Address) -> bool;

    /// Whether `address` is an authorized user.
    async fn is_authorized_user(&self, address: Address) -> bool;

    /// Number of accepted reports.
    async fn accident_count(&self) -> u64;

    /// Registered (vehicles, users).
    async fn entity_counts(&self) -> EntityCounts;

    /// Registered vehicles.
    async fn vehicle_count(&self) -> u64 {
        self.entity_counts().await.vehicles
    }

    /// Registered users.
    async fn user_count(&self) -> u64 {
        self.entity_counts().await.users
    }

    /// The authority address.
    fn traffic_authority(&self) -> Address;

    /// Stored report by id.
    async fn accident(&self, id: u64) -> Option<AccidentReport>;

    /// Last accepted report time of `reporter`.
    async fn last_report_time(&self, reporter: Address) -> Option<Timestamp>;
}
