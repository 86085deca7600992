//! fraudlens: headless scoring runner.
//!
//! Usage:
//!   fraudlens --seed 12345 --count 500 --days 7
//!   fraudlens --seed 12345 --count 500 --config thresholds.json

use anyhow::Result;
use chrono::Utc;
use fraudlens_core::{
    compute_metrics, evaluate, group_by_category, rollup_by_day_ending,
    generator::TransactionGenerator, CategoryBreakdown, CategoryField, FraudConfig, FraudMetrics,
    FraudSource, TimeSeriesPoint,
};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let count = parse_arg(&args, "--count", 500usize);
    let days = parse_arg(&args, "--days", 7u32);
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].clone());

    let config = match &config_path {
        Some(path) => FraudConfig::from_file(Path::new(path))?,
        None => FraudConfig::default(),
    };

    println!("fraudlens — scoring runner");
    println!("  seed:   {seed}");
    println!("  count:  {count}");
    println!("  days:   {days}");
    println!("  config: {}", config_path.as_deref().unwrap_or("(defaults)"));
    println!();

    let end_date = Utc::now().date_naive();
    let mut generator = TransactionGenerator::with_window(seed, days, end_date);
    let mut transactions = generator.generate_batch(count);

    for txn in &mut transactions {
        let evaluation = evaluate(txn, &config);
        txn.apply_evaluation(&evaluation, FraudSource::Rule);
    }
    log::info!("scored {} transactions", transactions.len());

    print_metrics(&compute_metrics(&transactions));
    print_breakdown("CHANNEL", &group_by_category(&transactions, CategoryField::Channel));
    print_breakdown(
        "PAYMENT MODE",
        &group_by_category(&transactions, CategoryField::PaymentMode),
    );
    print_breakdown("GATEWAY", &group_by_category(&transactions, CategoryField::Gateway));
    print_rollup(&rollup_by_day_ending(&transactions, days, end_date));

    Ok(())
}

fn print_metrics(metrics: &FraudMetrics) {
    println!("=== FRAUD METRICS ===");
    println!("  total txns:      {}", metrics.total_transactions);
    println!("  reported fraud:  {}", metrics.fraudulent_transactions);
    println!("  fraud rate:      {:.1}%", metrics.fraud_percentage);
    println!("  avg fraud score: {:.2}", metrics.average_fraud_score);
    println!("  false positives: {}", metrics.false_positives);
    println!("  false negatives: {}", metrics.false_negatives);
    println!("  precision:       {:.2}", metrics.precision);
    println!("  recall:          {:.2}", metrics.recall);
    println!();
}

fn print_breakdown(label: &str, breakdown: &[CategoryBreakdown]) {
    println!("=== FRAUD BY {label} ===");
    if breakdown.is_empty() {
        println!("  (no transactions)");
    }
    for entry in breakdown {
        println!(
            "  {:14} predicted: {:>4}  reported: {:>4}",
            entry.category, entry.predicted_count, entry.reported_count
        );
    }
    println!();
}

fn print_rollup(points: &[TimeSeriesPoint]) {
    println!("=== DAILY ROLLUP ===");
    for point in points {
        println!(
            "  {} | predicted: {:>4}  reported: {:>4}",
            point.date, point.predicted, point.reported
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
