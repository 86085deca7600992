//! Transaction records and the categorical tags the aggregator groups by.
//!
//! A `Transaction` arrives from an external source (generator, file, API)
//! and is never mutated after creation except to attach evaluation results
//! via [`Transaction::apply_evaluation`]. The timestamp is kept as the raw
//! ISO-8601 string it arrived as: a malformed value must degrade to a
//! non-trigger for the time-based rule, never to a failed evaluation.

use crate::evaluator::Evaluation;
use crate::types::{CountryCode, TransactionId};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

// ── Categorical tags ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Mobile,
    Web,
    Atm,
    InStore,
    Api,
}

impl Channel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Web => "web",
            Self::Atm => "atm",
            Self::InStore => "in_store",
            Self::Api => "api",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    CreditCard,
    DebitCard,
    BankTransfer,
    Upi,
    Wallet,
}

impl PaymentMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::BankTransfer => "bank_transfer",
            Self::Upi => "upi",
            Self::Wallet => "wallet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentGateway {
    Stripe,
    Paypal,
    Braintree,
    Razorpay,
    Internal,
}

impl PaymentGateway {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stripe => "stripe",
            Self::Paypal => "paypal",
            Self::Braintree => "braintree",
            Self::Razorpay => "razorpay",
            Self::Internal => "internal",
        }
    }
}

/// Which detector produced the predicted-fraud flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudSource {
    Rule,
    Model,
}

// ── Transaction record ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Monetary amount. Non-negative by contract with the source.
    pub amount: f64,
    pub currency: String,
    /// ISO-8601 timestamp, kept as received. See [`Transaction::hour`].
    pub timestamp: String,
    /// Billing/origin country.
    pub country: CountryCode,
    /// IP-derived country. Absent means the mismatch rule cannot trigger.
    #[serde(default)]
    pub ip_country: Option<CountryCode>,
    pub channel: Channel,
    pub payment_mode: PaymentMode,
    pub gateway: PaymentGateway,
    /// Recent-transaction count used by the velocity rule.
    /// Missing in the source data means 0, which never triggers.
    #[serde(default)]
    pub recent_transactions: u32,

    // Evaluation labels, attached after the fact.
    #[serde(default)]
    pub is_fraud_predicted: bool,
    #[serde(default)]
    pub is_fraud_reported: bool,
    #[serde(default)]
    pub fraud_score: f64,
    #[serde(default)]
    pub fraud_reason: Option<String>,
    #[serde(default)]
    pub fraud_source: Option<FraudSource>,
}

impl Transaction {
    /// Hour-of-day of the timestamp, read in the timestamp's own offset.
    /// Returns None when the timestamp does not parse.
    pub fn hour(&self) -> Option<u32> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.hour());
        }
        // Offset-less timestamps ("2026-08-10T14:30:00") still carry an hour.
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.hour())
    }

    /// Calendar date from the date portion of the ISO string (UTC by
    /// convention for all rollups). None when the portion does not parse.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        self.timestamp
            .get(..10)
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }

    /// Attach an evaluation result. Reason and source are only recorded for
    /// flagged transactions; clearing them on a clean result keeps
    /// re-evaluation idempotent.
    pub fn apply_evaluation(&mut self, evaluation: &Evaluation, source: FraudSource) {
        self.is_fraud_predicted = evaluation.is_fraudulent;
        self.fraud_score = evaluation.score;
        if evaluation.is_fraudulent {
            self.fraud_reason = Some(evaluation.reasons.join(", "));
            self.fraud_source = Some(source);
        } else {
            self.fraud_reason = None;
            self.fraud_source = None;
        }
    }
}
