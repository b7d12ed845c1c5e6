//! # Node Simulation
//!
//! Runs the node's six-scenario attack simulation and checks what reached the
//! event bus.

#[cfg(test)]
mod tests {
    use shared_bus::EventFilter;
    use shared_types::events::LedgerEvent;
    use vanet_ledger::ErrorKind;
    use vanet_node::simulation::{Expectation, Verdict};
    use vanet_node::{run_simulation, Actors, LedgerNode, NodeConfig, EXPECTED_REPORTS};

    const START: u64 = 1_700_000_000;

    #[tokio::test]
    async fn test_simulation_passes_final_status_check() {
        let node = LedgerNode::new(NodeConfig::default(), START).unwrap();
        let actors = Actors::derive(node.authority());

        let report = run_simulation(&node, &actors).await;

        assert!(report.is_success());
        assert_eq!(report.final_count, EXPECTED_REPORTS);
        let blocked: Vec<ErrorKind> = report
            .steps
            .iter()
            .filter(|s| s.expected == Expectation::Block)
            .filter_map(|s| match s.verdict {
                Verdict::Blocked { kind, .. } => Some(kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            blocked,
            vec![
                ErrorKind::AccessDenied,
                ErrorKind::RateLimited,
                ErrorKind::AccessDenied
            ]
        );
    }

    #[tokio::test]
    async fn test_simulation_bus_traffic() {
        let node = LedgerNode::new(NodeConfig::default(), START).unwrap();
        let actors = Actors::derive(node.authority());
        let mut all = node.bus.subscribe(EventFilter::all());

        run_simulation(&node, &actors).await;

        let mut registered = 0;
        let mut reported = 0;
        let mut alerts = 0;
        while let Ok(Some(event)) = all.try_recv() {
            match event {
                LedgerEvent::EntityRegistered { .. } => registered += 1,
                LedgerEvent::AccidentReported { .. } => reported += 1,
                LedgerEvent::SecurityAlert { .. } => alerts += 1,
            }
        }
        assert_eq!((registered, reported, alerts), (2, 2, 3));
        assert!(node.ledger.verify_integrity().await.is_valid());
    }

    #[tokio::test]
    async fn test_simulation_with_rate_limit_disabled_hits_duplicate() {
        // With no cooldown the replay reaches the fingerprint check. A one-hour
        // bucket keeps its fingerprint equal to the first report's.
        let mut config = NodeConfig::default();
        config.ledger.min_report_interval_secs = 0;
        config.ledger.fingerprint_bucket_secs = 3_600;
        let node = LedgerNode::new(config, START - START % 3_600).unwrap();
        let actors = Actors::derive(node.authority());

        let report = run_simulation(&node, &actors).await;

        assert!(report.is_success());
        assert!(matches!(
            report.steps[5].verdict,
            Verdict::Blocked {
                kind: ErrorKind::DuplicateReport,
                ..
            }
        ));
    }
}
