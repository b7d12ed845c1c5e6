//! # Node Configuration
//!
//! Ledger policy plus the authority address, overridable from the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VANET_AUTHORITY` | `authority` (40 hex chars, optional `0x`) |
//! | `VANET_MIN_REPORT_INTERVAL` | `ledger.min_report_interval_secs` |
//! | `VANET_FINGERPRINT_BUCKET` | `ledger.fingerprint_bucket_secs` |
//! | `VANET_CLOCK_POLICY` | `ledger.clock_policy` (`reject` / `clamp`) |
//! | `VANET_ALERT_ON_SPAM` | `ledger.alert_on_spam` |
//!
//! Invalid values are logged and the default is kept.

use crate::simulation::derive_address;
use shared_types::entities::Address;
use std::str::FromStr;
use tracing::{info, warn};
use vanet_ledger::{ClockPolicy, LedgerConfig};

/// Environment variable holding the log level. Read by `main` before the
/// subscriber exists, so it is not part of [`NodeConfig`].
pub const LOG_LEVEL_VAR: &str = "VANET_LOG_LEVEL";

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// The traffic authority.
    pub authority: Address,
    /// Ledger policy.
    pub ledger: LedgerConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            authority: derive_address("traffic-authority"),
            ledger: LedgerConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        override_with(&lookup, "VANET_AUTHORITY", &mut config.authority);
        override_with(
            &lookup,
            "VANET_MIN_REPORT_INTERVAL",
            &mut config.ledger.min_report_interval_secs,
        );
        override_with(
            &lookup,
            "VANET_FINGERPRINT_BUCKET",
            &mut config.ledger.fingerprint_bucket_secs,
        );
        override_with(&lookup, "VANET_CLOCK_POLICY", &mut config.ledger.clock_policy);

        if let Some(raw) = lookup("VANET_ALERT_ON_SPAM") {
            match parse_flag(&raw) {
                Some(flag) => config.ledger.alert_on_spam = flag,
                None => warn!(value = %raw, "VANET_ALERT_ON_SPAM must be true/false, keeping default"),
            }
        }

        if let Err(e) = config.ledger.validate() {
            warn!(error = %e, "Invalid ledger config, falling back to defaults");
            config.ledger = LedgerConfig::default();
        }

        config
    }
}

fn override_with<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.parse::<T>() {
        Ok(value) => {
            *slot = value;
            info!(key, value = %raw, "Loaded from environment");
        }
        Err(e) => warn!(key, value = %raw, error = %e, "Ignoring invalid value"),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
