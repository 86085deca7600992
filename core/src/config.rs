//! Scoring thresholds and rule toggles.

use crate::error::FraudResult;
use crate::types::CountryCode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Caller-supplied configuration for one evaluation pass.
/// Immutable per call; the evaluator never stores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Amounts strictly above this trigger the high-amount rule.
    pub amount_threshold: f64,
    pub high_risk_countries: HashSet<CountryCode>,
    pub unusual_hours: UnusualHours,
    pub ip_mismatch_enabled: bool,
    pub velocity_check_enabled: bool,
}

/// The night window for the unusual-hours rule.
///
/// The rule triggers when `hour >= start || hour <= end`, inclusive on both
/// ends and with no wrap-around handling. The default 23..5 reads as the
/// intended night window, but any configuration with `start <= end` makes
/// every hour of the day match (e.g. start 8, end 20 flags all 24 hours).
/// The literal comparison is a compatibility requirement with the reporting
/// backends that reproduce these scores and is preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusualHours {
    pub start: u32,
    pub end: u32,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            amount_threshold: 10_000.0,
            high_risk_countries: ["RU", "NG", "UA", "KP"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            unusual_hours: UnusualHours { start: 23, end: 5 },
            ip_mismatch_enabled: true,
            velocity_check_enabled: true,
        }
    }
}

impl FraudConfig {
    /// Load a config from a JSON file. Fields missing from the file keep
    /// their documented defaults.
    pub fn from_file(path: &Path) -> FraudResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
