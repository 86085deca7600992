//! Deterministic transaction generation using curated value pools.
//!
//! Supplies the transaction-source collaborator for the runner and the
//! integration tests. All generation is deterministic (same seed = same
//! batch). Roughly 15% of the population is seeded with risky field values
//! so the rule evaluator has something to find, and a small share of clean
//! transactions is reported as fraud anyway so confusion-matrix metrics see
//! false negatives.

use crate::rng::DetRng;
use crate::transaction::{Channel, PaymentGateway, PaymentMode, Transaction};
use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

const RISKY_SHARE: f64 = 0.15;
const REPORTED_GIVEN_RISKY: f64 = 0.85;
const FALSE_NEGATIVE_SHARE: f64 = 0.05;

pub struct TransactionGenerator {
    rng: DetRng,
    window_days: u32,
    end_date: NaiveDate,
}

impl TransactionGenerator {
    /// Generator over a 30-day trailing window ending at today's UTC date.
    pub fn new(seed: u64) -> Self {
        Self::with_window(seed, 30, Utc::now().date_naive())
    }

    /// Generator with a pinned window. Tests and reporting backends use
    /// this so batches line up with a fixed rollup window.
    pub fn with_window(seed: u64, window_days: u32, end_date: NaiveDate) -> Self {
        Self {
            rng: DetRng::new(seed),
            window_days: window_days.max(1),
            end_date,
        }
    }

    /// Generate one transaction with ground-truth `is_fraud_reported` set.
    /// Prediction labels are left unset; attaching them is the evaluator's
    /// job.
    pub fn generate(&mut self) -> Transaction {
        let risky = self.rng.chance(RISKY_SHARE);

        let amount = if risky && self.rng.chance(0.6) {
            round2(self.rng.range_f64(10_001.0, 25_000.0))
        } else {
            round2(self.rng.range_f64(10.0, 5_000.0))
        };

        let (country, ip_country) = if risky {
            let country = self.rng.pick(Self::high_risk_countries()).to_string();
            let ip_country = if self.rng.chance(0.5) {
                // Clean pool never overlaps the high-risk pool, so this is
                // always a mismatch.
                Some(self.rng.pick(Self::countries()).to_string())
            } else {
                Some(country.clone())
            };
            (country, ip_country)
        } else {
            let country = self.rng.pick(Self::countries()).to_string();
            let ip_country = if self.rng.chance(0.9) {
                Some(country.clone())
            } else {
                None
            };
            (country, ip_country)
        };

        let hour = if risky && self.rng.chance(0.5) {
            *self.rng.pick(&[23u32, 0, 1, 2, 3, 4, 5])
        } else {
            self.rng.next_u64_below(24) as u32
        };

        let recent_transactions = if risky && self.rng.chance(0.4) {
            6 + self.rng.next_u64_below(9) as u32
        } else {
            self.rng.next_u64_below(5) as u32
        };

        let is_fraud_reported = if risky {
            self.rng.chance(REPORTED_GIVEN_RISKY)
        } else {
            self.rng.chance(FALSE_NEGATIVE_SHARE)
        };

        Transaction {
            id: self.next_id().to_string(),
            amount,
            currency: self.rng.pick(Self::currencies()).to_string(),
            timestamp: self.next_timestamp(hour),
            country,
            ip_country,
            channel: *self.rng.pick(Self::channels()),
            payment_mode: *self.rng.pick(Self::payment_modes()),
            gateway: *self.rng.pick(Self::gateways()),
            recent_transactions,
            is_fraud_predicted: false,
            is_fraud_reported,
            fraud_score: 0.0,
            fraud_reason: None,
            fraud_source: None,
        }
    }

    /// Generate a batch of `count` transactions.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Transaction> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Reproducible uuid built from the deterministic stream.
    /// `Uuid::new_v4` would reach the platform RNG, which this crate forbids.
    fn next_id(&mut self) -> Uuid {
        let hi = self.rng.next_u64() as u128;
        let lo = self.rng.next_u64() as u128;
        Uuid::from_u128((hi << 64) | lo)
    }

    fn next_timestamp(&mut self, hour: u32) -> String {
        let offset = self.rng.next_u64_below(self.window_days as u64) as i64;
        let date = self.end_date - Duration::days(offset);
        let minute = self.rng.next_u64_below(60);
        let second = self.rng.next_u64_below(60);
        format!("{date}T{hour:02}:{minute:02}:{second:02}Z")
    }

    fn currencies() -> &'static [&'static str] {
        &["USD", "EUR", "GBP", "INR", "JPY"]
    }

    fn countries() -> &'static [&'static str] {
        &["US", "GB", "DE", "FR", "CA", "AU", "JP", "IN", "BR", "SG"]
    }

    /// Matches the default `FraudConfig` high-risk set.
    fn high_risk_countries() -> &'static [&'static str] {
        &["RU", "NG", "UA", "KP"]
    }

    fn channels() -> &'static [Channel] {
        &[
            Channel::Mobile,
            Channel::Web,
            Channel::Atm,
            Channel::InStore,
            Channel::Api,
        ]
    }

    fn payment_modes() -> &'static [PaymentMode] {
        &[
            PaymentMode::CreditCard,
            PaymentMode::DebitCard,
            PaymentMode::BankTransfer,
            PaymentMode::Upi,
            PaymentMode::Wallet,
        ]
    }

    fn gateways() -> &'static [PaymentGateway] {
        &[
            PaymentGateway::Stripe,
            PaymentGateway::Paypal,
            PaymentGateway::Braintree,
            PaymentGateway::Razorpay,
            PaymentGateway::Internal,
        ]
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
