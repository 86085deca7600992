//! fraudlens-core — deterministic fraud scoring and metrics aggregation.
//!
//! Two components, evaluated in sequence over a transaction set:
//!
//!   1. The rule evaluator ([`evaluate`]) scores one transaction at a time
//!      against a configuration of thresholds — stateless, deterministic,
//!      total over its input domain.
//!   2. The metrics aggregator ([`compute_metrics`], [`group_by_category`],
//!      [`rollup_by_day`]) turns the labeled set into confusion-matrix
//!      metrics, categorical breakdowns, and daily rollups.
//!
//! An optional external oracle ([`oracle::FraudOracle`]) can be blended
//! into a per-transaction score; every oracle failure degrades to the pure
//! rule-based result. The [`generator`] module supplies a deterministic
//! transaction source for the runner and tests.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod metrics;
pub mod oracle;
pub mod rng;
pub mod transaction;
pub mod types;

pub use config::{FraudConfig, UnusualHours};
pub use error::{FraudError, FraudResult};
pub use evaluator::{evaluate, Evaluation};
pub use metrics::{
    compute_metrics, group_by_category, rollup_by_day, rollup_by_day_ending, CategoryBreakdown,
    CategoryField, FraudMetrics, TimeSeriesPoint,
};
pub use oracle::{
    evaluate_batch_with_oracle, evaluate_with_oracle, FraudOracle, OracleEstimate,
    OracleEvaluation,
};
pub use transaction::{Channel, FraudSource, PaymentGateway, PaymentMode, Transaction};
