//! # Ledger Flows
//!
//! The observable properties of the ledger, exercised through the public
//! service API with a manual clock:
//!
//! 1. Registration is write-once and authority-only
//! 2. Reports inside the cooldown are rate limited
//! 3. Identical content in the same fingerprint bucket is a duplicate
//! 4. The demo scenario ends with exactly two reports

#[cfg(test)]
mod tests {
    use crate::fixtures::{attacker, authority, user, vehicle, Harness, T0};
    use shared_types::entities::{AlertKind, OriginKind, Role};
    use shared_types::events::LedgerEvent;
    use vanet_ledger::ports::inbound::AccidentLedgerApi;
    use vanet_ledger::{ClockPolicy, ErrorKind, LedgerConfig, LedgerError};

    fn kind<T: std::fmt::Debug>(result: Result<T, LedgerError>) -> ErrorKind {
        result.expect_err("call should be rejected").kind()
    }

    // =========================================================================
    // REGISTRY
    // =========================================================================

    #[tokio::test]
    async fn test_register_twice_counts_once() {
        let h = Harness::new();

        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();
        let second = h.ledger.register_vehicle(authority(), vehicle()).await;

        assert_eq!(kind(second), ErrorKind::AlreadyRegistered);
        assert_eq!(h.ledger.vehicle_count().await, 1);
        assert_eq!(
            h.sink.events(),
            vec![LedgerEvent::EntityRegistered {
                entity: vehicle(),
                role: Role::Vehicle
            }]
        );
    }

    #[tokio::test]
    async fn test_vehicle_and_user_roles_are_independent() {
        let h = Harness::new();

        h.ledger.register_user(authority(), vehicle()).await.unwrap();
        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();

        let counts = h.ledger.entity_counts().await;
        assert_eq!((counts.vehicles, counts.users), (1, 1));
        // Vehicle role wins when both are held.
        let receipt = h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();
        assert_eq!(receipt.origin, OriginKind::Machine);
    }

    #[tokio::test]
    async fn test_authority_is_fixed_and_cannot_report() {
        let h = Harness::new();
        assert_eq!(h.ledger.traffic_authority(), authority());

        let result = h.ledger.report_accident(authority(), "Hwy 1").await;
        assert_eq!(kind(result), ErrorKind::AccessDenied);
    }

    // =========================================================================
    // RATE LIMIT & DEDUP
    // =========================================================================

    #[tokio::test]
    async fn test_immediate_resubmission_rate_limited() {
        let h = Harness::registered().await;

        h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();
        h.clock.advance(10);
        let second = h.ledger.report_accident(vehicle(), "Hwy 1").await;

        assert_eq!(kind(second), ErrorKind::RateLimited);
        assert_eq!(h.ledger.accident_count().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_after_cooldown_in_same_bucket() {
        let h = Harness::with_config(LedgerConfig {
            fingerprint_bucket_secs: 3_600,
            ..LedgerConfig::default()
        });
        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();
        // Align to the start of an hour bucket.
        h.clock.set(T0 - T0 % 3_600);

        h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();
        h.clock.advance(61);

        let replay = h.ledger.report_accident(vehicle(), "Hwy 1").await;
        assert_eq!(kind(replay), ErrorKind::DuplicateReport);

        let varied = h.ledger.report_accident(vehicle(), "Hwy 2").await;
        assert!(varied.is_ok());
        assert_eq!(h.ledger.accident_count().await, 2);
    }

    #[tokio::test]
    async fn test_same_content_from_two_senders_not_duplicate() {
        let h = Harness::registered().await;

        let a = h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();
        let b = h.ledger.report_accident(user(), "Hwy 1").await.unwrap();

        assert_ne!(a.fingerprint, b.fingerprint);
        assert_eq!(h.ledger.accident_count().await, 2);
    }

    #[tokio::test]
    async fn test_last_report_time_only_increases() {
        let h = Harness::registered().await;

        h.ledger.report_accident(vehicle(), "A").await.unwrap();
        h.clock.advance(30);
        let _ = h.ledger.report_accident(vehicle(), "B").await;
        assert_eq!(h.ledger.last_report_time(vehicle()).await, Some(T0));

        h.clock.advance(30);
        h.ledger.report_accident(vehicle(), "B").await.unwrap();
        assert_eq!(h.ledger.last_report_time(vehicle()).await, Some(T0 + 60));
    }

    // =========================================================================
    // LEDGER
    // =========================================================================

    #[tokio::test]
    async fn test_records_sequential_and_chained() {
        let h = Harness::registered().await;

        for i in 0..3u64 {
            h.ledger
                .report_accident(vehicle(), &format!("Exit {i}"))
                .await
                .unwrap();
            h.clock.advance(60);
        }

        let records = h.ledger.accidents().await;
        assert_eq!(records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(records[1].prev_digest, records[0].digest);
        assert_eq!(records[2].prev_digest, records[1].digest);
        assert_eq!(h.ledger.snapshot().await.head_digest, records[2].digest);
        assert!(h.ledger.verify_integrity().await.is_valid());
    }

    #[tokio::test]
    async fn test_accident_reported_carries_record_fields() {
        let h = Harness::registered().await;
        let receipt = h.ledger.report_accident(user(), "Main St").await.unwrap();

        assert_eq!(
            h.sink.events(),
            vec![LedgerEvent::AccidentReported {
                id: receipt.id,
                location: "Main St".into(),
                reporter: user(),
                origin: OriginKind::Human,
                fingerprint: receipt.fingerprint,
                timestamp: T0,
            }]
        );
    }

    // =========================================================================
    // DEMO SCENARIO
    // =========================================================================

    #[tokio::test]
    async fn test_demo_scenario_end_to_end() {
        let h = Harness::new();

        // Setup
        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();
        h.ledger.register_user(authority(), user()).await.unwrap();

        // Two valid reports
        h.ledger.report_accident(vehicle(), "Sensor Detect Hwy 1").await.unwrap();
        h.clock.advance(1);
        h.ledger.report_accident(user(), "User Witness Hwy 1").await.unwrap();
        h.clock.advance(1);
        assert_eq!(h.ledger.accident_count().await, 2);

        // Impersonation
        let r = h.ledger.report_accident(attacker(), "Fake Data").await;
        assert_eq!(kind(r), ErrorKind::AccessDenied);

        // Spam
        let r = h.ledger.report_accident(vehicle(), "Sensor Detect Hwy 1").await;
        assert_eq!(kind(r), ErrorKind::RateLimited);

        // Sybil
        let r = h.ledger.register_vehicle(attacker(), attacker()).await;
        assert_eq!(kind(r), ErrorKind::AccessDenied);

        assert_eq!(h.ledger.accident_count().await, 2);

        let alert_kinds: Vec<AlertKind> = h
            .sink
            .alerts()
            .into_iter()
            .filter_map(|e| match e {
                LedgerEvent::SecurityAlert { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            alert_kinds,
            vec![AlertKind::Impersonation, AlertKind::Spam, AlertKind::Sybil]
        );
    }

    #[tokio::test]
    async fn test_reject_clock_policy_through_service() {
        let h = Harness::with_config(LedgerConfig {
            clock_policy: ClockPolicy::Reject,
            ..LedgerConfig::default()
        });
        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();
        h.ledger.register_user(authority(), user()).await.unwrap();
        h.ledger.report_accident(vehicle(), "A").await.unwrap();

        h.clock.set(T0 - 5);
        let r = h.ledger.report_accident(user(), "B").await;
        assert_eq!(kind(r), ErrorKind::ClockRegression);
        assert_eq!(h.ledger.stats().await.clock_rejections, 1);
    }
}
