//! Aggregate fraud statistics over a labeled transaction set.
//!
//! Everything here is recomputed from scratch on every call — there is no
//! incremental state to drift. All functions accept an empty input and
//! return zeroed/empty results; zero denominators are defined as zero,
//! never as NaN or an error.

use crate::transaction::Transaction;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Confusion-matrix metrics over predicted vs reported fraud flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FraudMetrics {
    pub total_transactions: usize,
    /// Count of transactions reported (ground truth) as fraud.
    pub fraudulent_transactions: usize,
    /// Reported fraud as a percentage of the total. 0 for an empty set.
    pub fraud_percentage: f64,
    /// Mean score over the predicted-fraud subset. 0 when nothing was
    /// predicted.
    pub average_fraud_score: f64,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// TP / (TP + FP), 0 when nothing was predicted.
    pub precision: f64,
    /// TP / (TP + FN), 0 when nothing was reported.
    pub recall: f64,
}

/// Allowed grouping keys for [`group_by_category`]. A typed enumeration,
/// not runtime field-name dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Channel,
    PaymentMode,
    Gateway,
}

/// Predicted vs reported fraud counts within one category value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub predicted_count: usize,
    pub reported_count: usize,
}

/// One calendar day of a trailing rollup window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub predicted: usize,
    pub reported: usize,
}

/// Compute confusion-matrix metrics over a labeled set.
pub fn compute_metrics(transactions: &[Transaction]) -> FraudMetrics {
    let total = transactions.len();
    let predicted = transactions
        .iter()
        .filter(|t| t.is_fraud_predicted)
        .count();
    let reported = transactions.iter().filter(|t| t.is_fraud_reported).count();

    let true_positives = transactions
        .iter()
        .filter(|t| t.is_fraud_predicted && t.is_fraud_reported)
        .count();
    let false_positives = transactions
        .iter()
        .filter(|t| t.is_fraud_predicted && !t.is_fraud_reported)
        .count();
    let false_negatives = transactions
        .iter()
        .filter(|t| !t.is_fraud_predicted && t.is_fraud_reported)
        .count();

    let score_sum: f64 = transactions
        .iter()
        .filter(|t| t.is_fraud_predicted)
        .map(|t| t.fraud_score)
        .sum();

    FraudMetrics {
        total_transactions: total,
        fraudulent_transactions: reported,
        fraud_percentage: if total == 0 {
            0.0
        } else {
            reported as f64 / total as f64 * 100.0
        },
        average_fraud_score: if predicted == 0 {
            0.0
        } else {
            score_sum / predicted as f64
        },
        false_positives,
        false_negatives,
        precision: ratio(true_positives, true_positives + false_positives),
        recall: ratio(true_positives, true_positives + false_negatives),
    }
}

/// Partition a set by the distinct values observed for `field`, counting
/// predicted and reported fraud within each partition. Categories appear in
/// first-occurrence order; an empty input yields an empty breakdown.
pub fn group_by_category(
    transactions: &[Transaction],
    field: CategoryField,
) -> Vec<CategoryBreakdown> {
    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();

    for txn in transactions {
        let label = match field {
            CategoryField::Channel => txn.channel.label(),
            CategoryField::PaymentMode => txn.payment_mode.label(),
            CategoryField::Gateway => txn.gateway.label(),
        };

        let idx = match breakdown.iter().position(|b| b.category == label) {
            Some(idx) => idx,
            None => {
                breakdown.push(CategoryBreakdown {
                    category: label.to_string(),
                    predicted_count: 0,
                    reported_count: 0,
                });
                breakdown.len() - 1
            }
        };

        if txn.is_fraud_predicted {
            breakdown[idx].predicted_count += 1;
        }
        if txn.is_fraud_reported {
            breakdown[idx].reported_count += 1;
        }
    }

    breakdown
}

/// Trailing daily rollup ending at today's UTC date. See
/// [`rollup_by_day_ending`] for the semantics.
pub fn rollup_by_day(transactions: &[Transaction], window_days: u32) -> Vec<TimeSeriesPoint> {
    rollup_by_day_ending(transactions, window_days, Utc::now().date_naive())
}

/// Build exactly `window_days` consecutive calendar-day buckets ending at
/// `end_date` (oldest first), counting predicted and reported fraud per
/// bucket. Days with no transactions are present with zero counts. A
/// transaction belongs to the bucket matching the date portion of its ISO
/// timestamp; transactions outside the window or with unparseable
/// timestamps are skipped.
pub fn rollup_by_day_ending(
    transactions: &[Transaction],
    window_days: u32,
    end_date: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    let mut points = Vec::with_capacity(window_days as usize);

    for offset in (0..window_days as i64).rev() {
        let date = end_date - Duration::days(offset);
        let mut predicted = 0;
        let mut reported = 0;

        for txn in transactions {
            if txn.calendar_date() == Some(date) {
                if txn.is_fraud_predicted {
                    predicted += 1;
                }
                if txn.is_fraud_reported {
                    reported += 1;
                }
            }
        }

        points.push(TimeSeriesPoint {
            date,
            predicted,
            reported,
        });
    }

    points
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
