//! # VANET Ledger Node
//!
//! Hosts one accident ledger and runs the attack simulation against it.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`VANET_LOG_LEVEL`, default INFO)
//! 2. Load configuration from the environment
//! 3. Wire the ledger, event bus and log sink
//! 4. Start the live alert monitor on the bus
//! 5. Run the six scenarios and the final status check
//!
//! The process exits non-zero if the final status check fails.

use anyhow::{bail, Context, Result};
use shared_types::entities::AlertKind;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vanet_ledger::ports::outbound::{SystemTimeSource, TimeSource};
use vanet_node::container::config::LOG_LEVEL_VAR;
use vanet_node::{
    run_simulation, spawn_alert_monitor, Actors, LedgerNode, NodeConfig, EXPECTED_REPORTS,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let raw_level = std::env::var(LOG_LEVEL_VAR).ok();
    let level = raw_level
        .as_deref()
        .and_then(|raw| raw.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    if let Some(raw) = raw_level.filter(|raw| raw.parse::<Level>().is_err()) {
        warn!(value = %raw, "{LOG_LEVEL_VAR} is not a log level, using INFO");
    }

    // Load configuration
    let config = NodeConfig::from_env();
    let node = LedgerNode::new(config, SystemTimeSource.now())
        .context("Failed to wire the accident ledger")?;
    let actors = Actors::derive(node.authority());

    info!("--- ROLE DEFINITIONS ---");
    info!("   [Admin]   Authority: {}", actors.authority);
    info!("   [Machine] Vehicle:   {}", actors.vehicle);
    info!("   [Human]   User App:  {}", actors.user);
    info!("   [Enemy]   Attacker:  {}", actors.attacker);

    let monitor = spawn_alert_monitor(&node.bus);

    let report = run_simulation(&node, &actors).await;

    let stats = node.ledger.stats().await;
    let intact = node.ledger.verify_integrity().await.is_valid();

    // Dropping the node closes the bus, which ends the monitor.
    drop(node);
    let alerts = monitor.await.context("Alert monitor task failed")?;
    info!(
        impersonation = alerts.count(AlertKind::Impersonation),
        sybil = alerts.count(AlertKind::Sybil),
        spam = alerts.count(AlertKind::Spam),
        missed = alerts.missed,
        emitted = stats.alerts_emitted,
        accepted = stats.reports_accepted,
        rejected = stats.rejections(),
        "Monitor summary"
    );

    if !intact {
        bail!("ledger integrity check failed");
    }
    if !report.is_success() {
        bail!(
            "final status check failed: {} reports recorded, expected {EXPECTED_REPORTS}",
            report.final_count
        );
    }
    Ok(())
}
