//! # Identity Registry
//!
//! Tracks authorized vehicles and users. Only the authority can grant roles,
//! and a grant is write-once: a second attempt fails instead of overwriting.
//! Identities are never revoked.

use crate::domain::entities::EntityCounts;
use crate::errors::{GuardedOperation, LedgerError};
use shared_types::entities::{Address, OriginKind, Role};
use std::collections::HashSet;

/// Authorized identities keyed by address.
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    authority: Address,
    vehicles: HashSet<Address>,
    users: HashSet<Address>,
}

impl IdentityRegistry {
    /// Creates an empty registry governed by `authority`.
    #[must_use]
    pub fn new(authority: Address) -> Self {
        Self {
            authority,
            vehicles: HashSet::new(),
            users: HashSet::new(),
        }
    }

    /// The authority fixed at creation.
    #[must_use]
    pub fn authority(&self) -> Address {
        self.authority
    }

    /// Grants `role` to `address` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if `caller` is not the authority (checked first).
    /// - `AlreadyRegistered` if `address` already holds `role`.
    pub fn register(
        &mut self,
        caller: Address,
        address: Address,
        role: Role,
    ) -> Result<(), LedgerError> {
        if caller != self.authority {
            return Err(LedgerError::AccessDenied {
                caller,
                operation: GuardedOperation::Register(role),
            });
        }

        let set = match role {
            Role::Vehicle => &mut self.vehicles,
            Role::User => &mut self.users,
        };

        if !set.insert(address) {
            return Err(LedgerError::AlreadyRegistered { address, role });
        }
        Ok(())
    }

    /// Whether `address` is an authorized vehicle.
    #[must_use]
    pub fn is_authorized_vehicle(&self, address: &Address) -> bool {
        self.vehicles.contains(address)
    }

    /// Whether `address` is an authorized user.
    #[must_use]
    pub fn is_authorized_user(&self, address: &Address) -> bool {
        self.users.contains(address)
    }

    /// Origin of reports filed by `address`, or `None` if it holds no role.
    ///
    /// An address registered in both categories reports as a vehicle.
    #[must_use]
    pub fn origin_of(&self, address: &Address) -> Option<OriginKind> {
        if self.is_authorized_vehicle(address) {
            Some(OriginKind::Machine)
        } else if self.is_authorized_user(address) {
            Some(OriginKind::Human)
        } else {
            None
        }
    }

    /// Registered (vehicles, users).
    #[must_use]
    pub fn counts(&self) -> EntityCounts {
        EntityCounts {
            vehicles: self.vehicles.len() as u64,
            users: self.users.len() as u64,
        }
    }
}
