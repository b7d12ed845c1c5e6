//! # Impersonation
//!
//! Unregistered senders try to file reports. Every attempt must be denied,
//! raise an `Impersonation` alert naming the sender, and leave the ledger
//! untouched, no matter how often or with what content.

#[cfg(test)]
mod tests {
    use crate::fixtures::{attacker, authority, Harness};
    use rand::{Rng, SeedableRng};
    use shared_types::entities::{Address, AlertKind};
    use shared_types::events::LedgerEvent;
    use vanet_ledger::ports::inbound::AccidentLedgerApi;
    use vanet_ledger::{GuardedOperation, LedgerError};

    #[tokio::test]
    async fn test_unregistered_sender_denied_with_alert() {
        let h = Harness::registered().await;

        let err = h
            .ledger
            .report_accident(attacker(), "Fake Data")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            LedgerError::AccessDenied {
                caller: attacker(),
                operation: GuardedOperation::Report
            }
        );
        assert_eq!(
            err.revert_reason(),
            "Access Denied: Not an authorized vehicle or user"
        );
        assert_eq!(
            h.sink.events(),
            vec![LedgerEvent::SecurityAlert {
                kind: AlertKind::Impersonation,
                attacker: attacker()
            }]
        );
        assert_eq!(h.ledger.accident_count().await, 0);
        assert_eq!(h.ledger.last_report_time(attacker()).await, None);
    }

    #[tokio::test]
    async fn test_random_senders_never_get_through() {
        let h = Harness::registered().await;
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5EED);

        for i in 0..200 {
            let mut bytes = [0u8; 20];
            rng.fill(&mut bytes);
            let forged = Address(bytes);
            let result = h.ledger.report_accident(forged, &format!("Forged {i}")).await;
            assert!(matches!(result, Err(LedgerError::AccessDenied { .. })));
            h.clock.advance(61);
        }

        assert_eq!(h.ledger.accident_count().await, 0);
        assert_eq!(h.sink.alerts().len(), 200);
        assert_eq!(h.ledger.stats().await.access_denied, 200);
    }

    #[tokio::test]
    async fn test_zero_address_is_not_special() {
        let h = Harness::registered().await;
        let result = h.ledger.report_accident(Address::ZERO, "Hwy 1").await;
        assert!(matches!(result, Err(LedgerError::AccessDenied { .. })));
    }

    #[tokio::test]
    async fn test_authority_key_alone_cannot_report() {
        let h = Harness::registered().await;
        let result = h.ledger.report_accident(authority(), "Hwy 1").await;
        assert!(matches!(
            result,
            Err(LedgerError::AccessDenied {
                operation: GuardedOperation::Report,
                ..
            })
        ));
    }
}
