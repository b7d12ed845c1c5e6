//! # Clock Skew
//!
//! A registered sender whose clock runs behind, or who rewinds it on purpose,
//! must not bypass the cooldown or break timestamp ordering.

#[cfg(test)]
mod tests {
    use crate::fixtures::{authority, user, vehicle, Harness, T0};
    use vanet_ledger::ports::inbound::AccidentLedgerApi;
    use vanet_ledger::{ClockPolicy, ErrorKind, LedgerConfig};

    #[tokio::test]
    async fn test_rewind_is_clamped_and_still_rate_limited() {
        let h = Harness::registered().await;
        h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();

        // Far in the past: clamped to T0, which is inside the cooldown.
        h.clock.set(T0 - 10_000);
        let err = h.ledger.report_accident(vehicle(), "Hwy 2").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert_eq!(h.ledger.last_report_time(vehicle()).await, Some(T0));
    }

    #[tokio::test]
    async fn test_stale_clock_from_another_sender_keeps_order() {
        let h = Harness::registered().await;
        h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();

        h.clock.set(T0 - 300);
        let receipt = h.ledger.report_accident(user(), "Hwy 9").await.unwrap();

        assert_eq!(receipt.timestamp, T0);
        let records = h.ledger.accidents().await;
        assert!(records.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(h.ledger.verify_integrity().await.is_valid());
    }

    #[tokio::test]
    async fn test_reject_policy_refuses_rewind() {
        let h = Harness::with_config(LedgerConfig {
            clock_policy: ClockPolicy::Reject,
            ..LedgerConfig::default()
        });
        h.ledger.register_vehicle(authority(), vehicle()).await.unwrap();
        h.ledger.register_user(authority(), user()).await.unwrap();
        h.ledger.report_accident(vehicle(), "Hwy 1").await.unwrap();

        h.clock.set(T0 - 1);
        let err = h.ledger.report_accident(user(), "Hwy 2").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ClockRegression);
        assert!(!err.is_attack_signal());
        // No spam alert for a clock problem.
        assert!(h.sink.alerts().is_empty());
        assert_eq!(h.ledger.accident_count().await, 1);
    }
}
