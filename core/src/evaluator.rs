//! Rule-based fraud scoring.
//!
//! Five heuristic checks run in a fixed order over a single transaction.
//! Each triggered rule contributes a fixed weight to the cumulative score
//! and a reason string carrying the offending value. The function is pure,
//! deterministic, and total: malformed fields are treated as non-triggers,
//! never as errors.

use crate::config::FraudConfig;
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};

// ── Rule weights (fixed, documented, never reordered) ────────────────────────

pub const WEIGHT_HIGH_AMOUNT: f64 = 0.3;
pub const WEIGHT_HIGH_RISK_COUNTRY: f64 = 0.4;
pub const WEIGHT_UNUSUAL_HOURS: f64 = 0.2;
pub const WEIGHT_IP_MISMATCH: f64 = 0.5;
pub const WEIGHT_HIGH_VELOCITY: f64 = 0.4;

/// Sum of every rule weight — the maximum reachable score.
pub const MAX_SCORE: f64 = 1.8;

/// Verdict threshold: a transaction is flagged once its score reaches this.
pub const FRAUD_THRESHOLD: f64 = 0.5;

/// Recent-transaction counts strictly above this trigger the velocity rule.
const VELOCITY_LIMIT: u32 = 5;

/// Outcome of one rule-based evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `score >= 0.5`.
    pub is_fraudulent: bool,
    /// Sum of triggered rule weights, rounded to two decimals.
    /// Not clamped: with every rule triggered this reaches 1.8.
    pub score: f64,
    /// One entry per triggered rule, in rule-check order.
    pub reasons: Vec<String>,
}

/// Score one transaction against a configuration of thresholds.
pub fn evaluate(txn: &Transaction, config: &FraudConfig) -> Evaluation {
    let mut reasons = Vec::new();
    let mut score = 0.0;

    // Rule 1: high amount
    if txn.amount > config.amount_threshold {
        reasons.push(format!("High amount ({})", txn.amount));
        score += WEIGHT_HIGH_AMOUNT;
    }

    // Rule 2: high-risk billing country
    if config.high_risk_countries.contains(&txn.country) {
        reasons.push(format!("High-risk country ({})", txn.country));
        score += WEIGHT_HIGH_RISK_COUNTRY;
    }

    // Rule 3: unusual hours. The comparison is literal and inclusive on
    // both ends; see UnusualHours for the start <= end consequences.
    // An unparseable timestamp simply never triggers.
    if let Some(hour) = txn.hour() {
        if hour >= config.unusual_hours.start || hour <= config.unusual_hours.end {
            reasons.push(format!("Unusual hours ({hour}:00)"));
            score += WEIGHT_UNUSUAL_HOURS;
        }
    }

    // Rule 4: IP-derived country disagrees with billing country
    if config.ip_mismatch_enabled {
        if let Some(ip_country) = &txn.ip_country {
            if ip_country != &txn.country {
                reasons.push(format!(
                    "IP country mismatch (IP: {}, Billing: {})",
                    ip_country, txn.country
                ));
                score += WEIGHT_IP_MISMATCH;
            }
        }
    }

    // Rule 5: transaction velocity
    if config.velocity_check_enabled && txn.recent_transactions > VELOCITY_LIMIT {
        reasons.push(format!(
            "High velocity ({} transactions recently)",
            txn.recent_transactions
        ));
        score += WEIGHT_HIGH_VELOCITY;
    }

    let score = round2(score);
    Evaluation {
        is_fraudulent: score >= FRAUD_THRESHOLD,
        score,
        reasons,
    }
}

/// Round to two decimal places. Published scores are always rounded so that
/// reporting backends reproduce them byte-for-byte.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
