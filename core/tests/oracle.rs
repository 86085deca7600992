//! Oracle blend and fallback tests.
//!
//! The oracles here are scripted stand-ins: the contract under test is the
//! blend arithmetic and the degrade-to-rules behavior, not any real
//! scoring service.

use fraudlens_core::config::FraudConfig;
use fraudlens_core::error::{FraudError, FraudResult};
use fraudlens_core::evaluator::evaluate;
use fraudlens_core::oracle::{
    evaluate_batch_with_oracle, evaluate_with_oracle, FraudOracle, OracleEstimate,
    FALLBACK_ANALYSIS,
};
use fraudlens_core::transaction::{Channel, PaymentGateway, PaymentMode, Transaction};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(250);

fn transaction() -> Transaction {
    Transaction {
        id: "txn-oracle".into(),
        amount: 100.0,
        currency: "USD".into(),
        timestamp: "2026-08-10T14:30:00Z".into(),
        country: "US".into(),
        ip_country: Some("US".into()),
        channel: Channel::Api,
        payment_mode: PaymentMode::Wallet,
        gateway: PaymentGateway::Internal,
        recent_transactions: 0,
        is_fraud_predicted: false,
        is_fraud_reported: false,
        fraud_score: 0.0,
        fraud_reason: None,
        fraud_source: None,
    }
}

/// Rule score 0.5 (IP mismatch only).
fn mismatched_transaction() -> Transaction {
    let mut txn = transaction();
    txn.ip_country = Some("DE".into());
    txn
}

struct ScriptedOracle {
    estimate: OracleEstimate,
}

#[async_trait::async_trait]
impl FraudOracle for ScriptedOracle {
    async fn assess(&self, _txn: &Transaction) -> FraudResult<OracleEstimate> {
        Ok(self.estimate.clone())
    }
}

struct FailingOracle;

#[async_trait::async_trait]
impl FraudOracle for FailingOracle {
    async fn assess(&self, _txn: &Transaction) -> FraudResult<OracleEstimate> {
        Err(FraudError::OracleUnavailable("connection refused".into()))
    }
}

struct SlowOracle {
    delay: Duration,
}

#[async_trait::async_trait]
impl FraudOracle for SlowOracle {
    async fn assess(&self, _txn: &Transaction) -> FraudResult<OracleEstimate> {
        tokio::time::sleep(self.delay).await;
        Ok(OracleEstimate {
            is_fraudulent: true,
            confidence: 1.0,
            reasoning: "too late to matter".into(),
        })
    }
}

/// Published score is the unweighted mean of rule score and confidence.
#[tokio::test]
async fn blend_is_the_mean_of_both_scores() {
    let oracle = ScriptedOracle {
        estimate: OracleEstimate {
            is_fraudulent: false,
            confidence: 0.9,
            reasoning: "Velocity pattern resembles account takeover.".into(),
        },
    };
    let txn = mismatched_transaction();
    let config = FraudConfig::default();

    let result = evaluate_with_oracle(&txn, &config, &oracle, TIMEOUT).await;
    assert_eq!(result.evaluation.score, 0.7); // (0.5 + 0.9) / 2
    assert!(result.evaluation.is_fraudulent);
    assert_eq!(result.ai_analysis, "Velocity pattern resembles account takeover.");
    // Reasons stay rule-based.
    assert_eq!(result.evaluation.reasons.len(), 1);
}

/// The oracle's own verdict flags a transaction even when the blended
/// score stays low.
#[tokio::test]
async fn oracle_verdict_overrides_a_low_blend() {
    let oracle = ScriptedOracle {
        estimate: OracleEstimate {
            is_fraudulent: true,
            confidence: 0.2,
            reasoning: String::new(),
        },
    };
    let txn = transaction();
    let config = FraudConfig::default();

    let result = evaluate_with_oracle(&txn, &config, &oracle, TIMEOUT).await;
    assert_eq!(result.evaluation.score, 0.1);
    assert!(result.evaluation.is_fraudulent);
    assert_eq!(result.ai_analysis, "No detailed analysis provided.");
}

/// The blended verdict is strict at 0.5: landing exactly on the threshold
/// without an oracle verdict is not flagged (unlike the rule-only path).
#[tokio::test]
async fn blend_threshold_is_strict() {
    let oracle = ScriptedOracle {
        estimate: OracleEstimate {
            is_fraudulent: false,
            confidence: 0.5,
            reasoning: "Inconclusive.".into(),
        },
    };
    let txn = mismatched_transaction();
    let config = FraudConfig::default();

    let result = evaluate_with_oracle(&txn, &config, &oracle, TIMEOUT).await;
    assert_eq!(result.evaluation.score, 0.5);
    assert!(!result.evaluation.is_fraudulent);
}

/// An unavailable oracle degrades to the pure rule-based result.
#[tokio::test]
async fn oracle_failure_falls_back_to_rules() {
    let txn = mismatched_transaction();
    let config = FraudConfig::default();

    let result = evaluate_with_oracle(&txn, &config, &FailingOracle, TIMEOUT).await;
    assert_eq!(result.evaluation, evaluate(&txn, &config));
    assert_eq!(result.ai_analysis, FALLBACK_ANALYSIS);
}

/// A slow oracle is cut off at the timeout and the caller still gets the
/// rule-based result.
#[tokio::test]
async fn oracle_timeout_falls_back_to_rules() {
    let txn = transaction();
    let config = FraudConfig::default();
    let oracle = SlowOracle {
        delay: Duration::from_millis(200),
    };

    let result = evaluate_with_oracle(&txn, &config, &oracle, Duration::from_millis(5)).await;
    assert_eq!(result.evaluation, evaluate(&txn, &config));
    assert_eq!(result.ai_analysis, FALLBACK_ANALYSIS);
}

/// A batch resolves every transaction before returning, failures included.
#[tokio::test]
async fn batch_resolves_every_transaction() {
    let txns = vec![transaction(), mismatched_transaction(), transaction()];
    let config = FraudConfig::default();

    let oracle = ScriptedOracle {
        estimate: OracleEstimate {
            is_fraudulent: false,
            confidence: 0.4,
            reasoning: "Nothing remarkable.".into(),
        },
    };
    let results = evaluate_batch_with_oracle(&txns, &config, &oracle, TIMEOUT).await;
    assert_eq!(results.len(), 3);
    assert_eq!(results[1].evaluation.score, 0.45); // (0.5 + 0.4) / 2

    let results = evaluate_batch_with_oracle(&txns, &config, &FailingOracle, TIMEOUT).await;
    assert_eq!(results.len(), 3);
    for (result, txn) in results.iter().zip(&txns) {
        assert_eq!(result.evaluation, evaluate(txn, &config));
        assert_eq!(result.ai_analysis, FALLBACK_ANALYSIS);
    }
}
