//! # Attack Simulation
//!
//! Drives a ledger through six scenarios: registration, a machine report, a
//! human report, then impersonation, spam and Sybil attempts. The run is a
//! success when every step ends the way it should and exactly
//! [`EXPECTED_REPORTS`] reports were recorded.

use crate::container::LedgerNode;
use shared_types::entities::{Address, Fingerprint, OriginKind};
use tracing::{error, info, warn};
use vanet_ledger::domain::services::keccak256;
use vanet_ledger::ports::inbound::AccidentLedgerApi;
use vanet_ledger::{ErrorKind, GuardedOperation, LedgerError};

/// Valid reports a clean run records.
pub const EXPECTED_REPORTS: u64 = 2;

/// Location of the machine report (and of the spam replay).
pub const MACHINE_LOCATION: &str = "Sensor Detect Hwy 1";
/// Location of the human report.
pub const HUMAN_LOCATION: &str = "User Witness Hwy 1";
/// Location the attacker tries to file.
pub const FAKE_LOCATION: &str = "Fake Data";

/// Derives a stable address from a label: the last 20 bytes of its Keccak-256.
#[must_use]
pub fn derive_address(label: &str) -> Address {
    let digest = keccak256(label.as_bytes());
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest.as_bytes()[12..]);
    Address(out)
}

/// Participants of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actors {
    /// The traffic authority.
    pub authority: Address,
    /// The machine node.
    pub vehicle: Address,
    /// The human user.
    pub user: Address,
    /// The unregistered attacker.
    pub attacker: Address,
    /// Identity the attacker tries to mint.
    pub fake_vehicle: Address,
}

impl Actors {
    /// Fixed actors around the given authority.
    #[must_use]
    pub fn derive(authority: Address) -> Self {
        Self {
            authority,
            vehicle: derive_address("machine-node"),
            user: derive_address("human-user"),
            attacker: derive_address("attacker"),
            fake_vehicle: derive_address("fake-vehicle"),
        }
    }
}

/// What a step is supposed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The call should succeed.
    Accept,
    /// The call should be rejected.
    Block,
}

/// How a step actually ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Registration succeeded.
    Registered,
    /// Registration was not attempted because the role is already held.
    AlreadyPresent,
    /// A report was recorded.
    Reported {
        /// Sequence id.
        id: u64,
        /// Fingerprint.
        fingerprint: Fingerprint,
        /// Machine or human origin.
        origin: OriginKind,
    },
    /// The ledger rejected the call.
    Blocked {
        /// Error kind.
        kind: ErrorKind,
        /// Revert reason text.
        reason: &'static str,
        /// Attack classification.
        threat: &'static str,
    },
}

impl Verdict {
    fn matches(&self, expected: Expectation) -> bool {
        match (self, expected) {
            (Self::Blocked { .. }, Expectation::Block) => true,
            (Self::Blocked { .. }, Expectation::Accept) | (_, Expectation::Block) => false,
            (_, Expectation::Accept) => true,
        }
    }
}

/// One executed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// Scenario number (1-6).
    pub scenario: u8,
    /// Short description.
    pub title: &'static str,
    /// Intended outcome.
    pub expected: Expectation,
    /// Actual outcome.
    pub verdict: Verdict,
}

impl StepOutcome {
    /// Whether the step ended as intended.
    #[must_use]
    pub fn as_expected(&self) -> bool {
        self.verdict.matches(self.expected)
    }
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Every step in order.
    pub steps: Vec<StepOutcome>,
    /// Report count at the end of the run.
    pub final_count: u64,
}

impl SimulationReport {
    /// Steps that did not end as intended.
    pub fn unexpected(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| !s.as_expected())
    }

    /// Every step as intended and exactly [`EXPECTED_REPORTS`] recorded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.final_count == EXPECTED_REPORTS && self.unexpected().next().is_none()
    }
}

/// Maps a rejection onto the attack it indicates.
#[must_use]
pub fn classify(err: &LedgerError) -> &'static str {
    match err {
        LedgerError::AccessDenied {
            operation: GuardedOperation::Register(_),
            ..
        } => "Sybil Defense (Only Admin can Register)",
        LedgerError::AccessDenied {
            operation: GuardedOperation::Report,
            ..
        } => "Impersonation (Not Authorized)",
        LedgerError::RateLimited { .. } => "Rate Limit (Spamming Detected)",
        LedgerError::DuplicateReport(_) => "Duplicate Report (Hash Collision)",
        LedgerError::AlreadyRegistered { .. } => "Registration Error (Duplicate)",
        LedgerError::ClockRegression { .. } => "Clock Regression (Stale Timestamp)",
    }
}

fn blocked(err: &LedgerError) -> Verdict {
    Verdict::Blocked {
        kind: err.kind(),
        reason: err.revert_reason(),
        threat: classify(err),
    }
}

fn banner(scenario: u8, title: &str, description: &str) {
    info!("============================================================");
    info!("SCENARIO {scenario}: {title}");
    info!("DESCRIPTION: {description}");
    info!("============================================================");
}

fn log_step(step: &StepOutcome) {
    match (&step.verdict, step.as_expected()) {
        (Verdict::Blocked { threat, reason, .. }, true) => {
            info!(reason, "BLOCKED (Expected): {threat}");
        }
        (Verdict::Blocked { threat, reason, .. }, false) => {
            error!(reason, "FAILED (Unexpected): {threat}");
        }
        (Verdict::Reported { id, fingerprint, origin }, _) => {
            info!(
                id,
                report_hash = %fingerprint.to_hex(),
                source = origin.label(),
                "Success! Report recorded"
            );
        }
        (Verdict::Registered, _) => info!("Success! Identity registered"),
        (Verdict::AlreadyPresent, _) => info!("Already registered, skipping"),
    }
}

/// Runs all six scenarios against `node`.
///
/// The node clock moves forward one second per step, like one block per
/// transaction, so the spam replay lands well inside the cooldown.
pub async fn run_simulation(node: &LedgerNode, actors: &Actors) -> SimulationReport {
    let ledger = &node.ledger;
    let mut steps = Vec::new();
    let mut record = |step: StepOutcome| {
        log_step(&step);
        steps.push(step);
    };

    banner(
        1,
        "SYSTEM SETUP & REGISTRATION",
        "The Authority whitelists a Machine and a Human User.",
    );
    let verdict = if ledger.is_authorized_vehicle(actors.vehicle).await {
        Verdict::AlreadyPresent
    } else {
        match ledger.register_vehicle(actors.authority, actors.vehicle).await {
            Ok(()) => Verdict::Registered,
            Err(e) => blocked(&e),
        }
    };
    record(StepOutcome {
        scenario: 1,
        title: "register machine node",
        expected: Expectation::Accept,
        verdict,
    });
    node.clock.advance(1);

    let verdict = if ledger.is_authorized_user(actors.user).await {
        Verdict::AlreadyPresent
    } else {
        match ledger.register_user(actors.authority, actors.user).await {
            Ok(()) => Verdict::Registered,
            Err(e) => blocked(&e),
        }
    };
    record(StepOutcome {
        scenario: 1,
        title: "register human user",
        expected: Expectation::Accept,
        verdict,
    });
    node.clock.advance(1);

    banner(
        2,
        "MACHINE REPORT",
        "Machine sends a valid report. Timestamp is assigned by the ledger.",
    );
    let verdict = report(node, actors.vehicle, MACHINE_LOCATION).await;
    record(StepOutcome {
        scenario: 2,
        title: "machine report",
        expected: Expectation::Accept,
        verdict,
    });
    node.clock.advance(1);

    banner(
        3,
        "HUMAN REPORT",
        "Human sends a valid report. Timestamp is assigned by the ledger.",
    );
    let verdict = report(node, actors.user, HUMAN_LOCATION).await;
    record(StepOutcome {
        scenario: 3,
        title: "human report",
        expected: Expectation::Accept,
        verdict,
    });
    node.clock.advance(1);

    banner(
        4,
        "IMPERSONATION ATTACK",
        "Unauthorized attacker tries to send a report.",
    );
    let verdict = report(node, actors.attacker, FAKE_LOCATION).await;
    record(StepOutcome {
        scenario: 4,
        title: "impersonated report",
        expected: Expectation::Block,
        verdict,
    });
    node.clock.advance(1);

    banner(
        5,
        "SPAM ATTACK (Rate Limit & Duplicate)",
        "Machine tries to send the exact same report immediately.",
    );
    let verdict = report(node, actors.vehicle, MACHINE_LOCATION).await;
    record(StepOutcome {
        scenario: 5,
        title: "replayed machine report",
        expected: Expectation::Block,
        verdict,
    });
    node.clock.advance(1);

    banner(
        6,
        "SYBIL ATTACK",
        "Attacker tries to register a fake car identity.",
    );
    let verdict = match ledger
        .register_vehicle(actors.attacker, actors.fake_vehicle)
        .await
    {
        Ok(()) => Verdict::Registered,
        Err(e) => blocked(&e),
    };
    record(StepOutcome {
        scenario: 6,
        title: "forged registration",
        expected: Expectation::Block,
        verdict,
    });

    let final_count = ledger.accident_count().await;
    info!("============================================================");
    info!("FINAL SYSTEM STATUS CHECK");
    info!("============================================================");
    info!(final_count, "Total accidents recorded");

    let report = SimulationReport { steps, final_count };
    if report.is_success() {
        info!("SUCCESS: Exactly {EXPECTED_REPORTS} valid reports");
        info!("SUCCESS: All attacks and spam attempts blocked");
    } else {
        warn!(
            final_count,
            expected = EXPECTED_REPORTS,
            unexpected = report.unexpected().count(),
            "CHECK: simulation deviated from the expected outcome"
        );
    }
    report
}

async fn report(node: &LedgerNode, caller: Address, location: &str) -> Verdict {
    match node.ledger.report_accident(caller, location).await {
        Ok(receipt) => Verdict::Reported {
            id: receipt.id,
            fingerprint: receipt.fingerprint,
            origin: receipt.origin,
        },
        Err(e) => blocked(&e),
    }
}
