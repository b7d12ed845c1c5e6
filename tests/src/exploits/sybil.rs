//! # Sybil Registration
//!
//! Non-authority callers try to mint identities, including registered
//! participants trying to register accomplices. Every attempt must be denied
//! with a `Sybil` alert and leave the registry counts unchanged.

#[cfg(test)]
mod tests {
    use crate::fixtures::{attacker, authority, user, vehicle, Harness};
    use shared_types::entities::{Address, AlertKind};
    use shared_types::events::LedgerEvent;
    use vanet_ledger::ports::inbound::AccidentLedgerApi;
    use vanet_ledger::{ErrorKind, LedgerError};

    #[tokio::test]
    async fn test_attacker_cannot_register_fake_vehicle() {
        let h = Harness::registered().await;
        let fake = Address::repeat_byte(0xFA);

        let err = h.ledger.register_vehicle(attacker(), fake).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(err.revert_reason(), "Only Traffic Authority can register");
        assert!(!h.ledger.is_authorized_vehicle(fake).await);
        assert_eq!(
            h.sink.events(),
            vec![LedgerEvent::SecurityAlert {
                kind: AlertKind::Sybil,
                attacker: attacker()
            }]
        );
    }

    #[tokio::test]
    async fn test_registered_participants_cannot_register_others() {
        let h = Harness::registered().await;
        let accomplice = Address::repeat_byte(0xAC);

        let by_vehicle = h.ledger.register_user(vehicle(), accomplice).await;
        let by_user = h.ledger.register_vehicle(user(), accomplice).await;

        assert!(matches!(by_vehicle, Err(LedgerError::AccessDenied { .. })));
        assert!(matches!(by_user, Err(LedgerError::AccessDenied { .. })));
        let counts = h.ledger.entity_counts().await;
        assert_eq!((counts.vehicles, counts.users), (1, 1));
    }

    #[tokio::test]
    async fn test_self_registration_denied() {
        let h = Harness::new();
        let result = h.ledger.register_vehicle(attacker(), attacker()).await;

        assert!(matches!(result, Err(LedgerError::AccessDenied { caller, .. }) if caller == attacker()));
        // Still cannot report afterwards.
        assert!(h.ledger.report_accident(attacker(), "Hwy 1").await.is_err());
    }

    #[tokio::test]
    async fn test_denial_precedes_already_registered() {
        // Existing vehicle, wrong caller: AccessDenied, not AlreadyRegistered.
        let h = Harness::registered().await;
        let result = h.ledger.register_vehicle(attacker(), vehicle()).await;
        assert!(matches!(result, Err(LedgerError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_mass_sybil_attempt() {
        let h = Harness::new();
        for i in 0..=255u8 {
            let _ = h.ledger.register_vehicle(attacker(), Address::repeat_byte(i)).await;
            let _ = h.ledger.register_user(attacker(), Address::repeat_byte(i)).await;
        }

        let counts = h.ledger.entity_counts().await;
        assert_eq!((counts.vehicles, counts.users), (0, 0));
        assert_eq!(h.sink.alerts().len(), 512);
        assert_eq!(h.ledger.traffic_authority(), authority());
    }
}
