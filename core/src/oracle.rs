//! Optional external scoring oracle.
//!
//! The oracle is an injected capability, never hardwired: any scoring
//! service (ML model, LLM, remote API) that can produce a confidence
//! estimate for one transaction plugs in through [`FraudOracle`]. Its
//! result is blended with the rule-based score as an unweighted mean.
//!
//! Every failure path — unavailability, timeout, unparseable response —
//! degrades to the pure rule-based result. An oracle can improve a verdict;
//! it can never fail an evaluation.

use crate::config::FraudConfig;
use crate::error::{FraudError, FraudResult};
use crate::evaluator::{self, Evaluation, FRAUD_THRESHOLD};
use crate::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Analysis text published when the oracle could not be used.
pub const FALLBACK_ANALYSIS: &str = "AI analysis failed, using rule-based detection.";

/// An independent confidence estimate from the external oracle.
///
/// The serde field names follow the JSON contract the oracle is prompted
/// to answer with, so [`parse_estimate`] can deserialize its replies
/// directly. Missing fields default rather than fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleEstimate {
    #[serde(rename = "isFraudulent", default)]
    pub is_fraudulent: bool,
    /// Confidence in [0, 1].
    #[serde(rename = "confidenceScore", default)]
    pub confidence: f64,
    #[serde(rename = "reasoning", default)]
    pub reasoning: String,
}

/// The capability contract an external scoring service fulfills.
#[async_trait::async_trait]
pub trait FraudOracle: Send + Sync {
    /// Produce an independent estimate for one transaction.
    async fn assess(&self, txn: &Transaction) -> FraudResult<OracleEstimate>;
}

/// A rule-based evaluation enriched with the oracle's analysis text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleEvaluation {
    #[serde(flatten)]
    pub evaluation: Evaluation,
    pub ai_analysis: String,
}

/// Extract an [`OracleEstimate`] from free-form oracle output.
///
/// Conversational oracles wrap their JSON answer in prose; this takes the
/// outermost `{...}` span of the text and deserializes it. Non-numeric or
/// absent confidence values are a parse failure / a zero default
/// respectively — callers fall back to the rule-based result either way.
pub fn parse_estimate(text: &str) -> FraudResult<OracleEstimate> {
    let start = text
        .find('{')
        .ok_or_else(|| FraudError::OracleResponse("no JSON object in response".into()))?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| FraudError::OracleResponse("no JSON object in response".into()))?;
    serde_json::from_str(&text[start..=end])
        .map_err(|e| FraudError::OracleResponse(e.to_string()))
}

/// Evaluate one transaction, blending the rule score with the oracle's
/// estimate when the oracle answers within `timeout`.
///
/// Published score is `round2((rule_score + confidence) / 2)`; the verdict
/// is `combined > 0.5 || oracle_verdict` (strict comparison — a blend that
/// lands exactly on 0.5 is not flagged unless the oracle says so). On any
/// oracle failure the rule-based result is returned unchanged with a fixed
/// fallback analysis string.
pub async fn evaluate_with_oracle(
    txn: &Transaction,
    config: &FraudConfig,
    oracle: &dyn FraudOracle,
    timeout: Duration,
) -> OracleEvaluation {
    let rule_based = evaluator::evaluate(txn, config);

    let estimate = match tokio::time::timeout(timeout, oracle.assess(txn)).await {
        Ok(Ok(estimate)) => estimate,
        Ok(Err(err)) => {
            log::warn!("oracle call failed for {}: {err}", txn.id);
            return fallback(rule_based);
        }
        Err(_) => {
            log::warn!(
                "oracle call timed out after {}ms for {}",
                timeout.as_millis(),
                txn.id
            );
            return fallback(rule_based);
        }
    };

    let combined = evaluator::round2((rule_based.score + estimate.confidence) / 2.0);
    let ai_analysis = if estimate.reasoning.is_empty() {
        "No detailed analysis provided.".to_string()
    } else {
        estimate.reasoning
    };

    OracleEvaluation {
        evaluation: Evaluation {
            is_fraudulent: combined > FRAUD_THRESHOLD || estimate.is_fraudulent,
            score: combined,
            reasons: rule_based.reasons,
        },
        ai_analysis,
    }
}

/// Evaluate a batch with one oracle call per transaction, issued
/// concurrently with no ordering guarantee between them. Returns only after
/// every transaction has resolved (successfully or via fallback), so
/// aggregate metrics can be computed over the full batch.
pub async fn evaluate_batch_with_oracle(
    txns: &[Transaction],
    config: &FraudConfig,
    oracle: &dyn FraudOracle,
    timeout: Duration,
) -> Vec<OracleEvaluation> {
    let calls = txns
        .iter()
        .map(|txn| evaluate_with_oracle(txn, config, oracle, timeout));
    futures::future::join_all(calls).await
}

fn fallback(rule_based: Evaluation) -> OracleEvaluation {
    OracleEvaluation {
        evaluation: rule_based,
        ai_analysis: FALLBACK_ANALYSIS.to_string(),
    }
}
