//! Score a CSV of farm records
//!
//! Reads farms from a CSV with one column per input field, validates each
//! row, scores the valid ones in parallel, and prints the results as JSON
//! followed by a batch summary on stderr.
//!
//! Usage:
//!   cargo run --release --bin score_batch -- farms.csv
//!   MODEL_PATH=models/risk_score_regressor.json cargo run --bin score_batch -- farms.csv

use anyhow::Context;
use fieldscore::batch::{load_farm_records, partition_valid, BatchSummary};
use fieldscore::{load_optional_model, RiskAssessor};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let csv_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: score_batch <farms.csv>")?;

    let model_path = PathBuf::from(
        std::env::var("MODEL_PATH").unwrap_or_else(|_| "models/risk_score_regressor.json".to_string()),
    );

    let start = Instant::now();
    let records = load_farm_records(&csv_path)?;
    let (valid, rejected) = partition_valid(records);

    for r in &rejected {
        eprintln!("  ✗ row {}: {}", r.row, r.errors);
    }

    let assessor = RiskAssessor::new(load_optional_model(&model_path));
    let (rows, farms): (Vec<usize>, Vec<_>) = valid.into_iter().unzip();
    let assessments = assessor.assess_batch(&farms);
    let summary = BatchSummary::from_assessments(&assessments);

    let output: Vec<serde_json::Value> = rows
        .iter()
        .zip(&assessments)
        .map(|(row, a)| serde_json::json!({ "row": row, "result": a.result }))
        .collect();
    println!("{}", serde_json::to_string_pretty(&output)?);

    eprintln!();
    eprintln!("{}", "=".repeat(70));
    eprintln!("Scored {} farms ({} rejected) in {:.2?}", summary.total, rejected.len(), start.elapsed());
    eprintln!("  Scoring: {}", assessor.model_name().unwrap_or("rule-based"));
    for tag in ["high-risk", "medium-risk", "low-risk"] {
        eprintln!("  {:<12} {}", tag, summary.count(tag));
    }
    if let Some(mean) = summary.mean_score {
        eprintln!("  Mean score:  {:.1}", mean);
    }
    if summary.defaulted_crops > 0 {
        eprintln!("  ⚠ {} farm(s) had an unknown crop type (scored as maize)", summary.defaulted_crops);
    }
    eprintln!("{}", "=".repeat(70));

    Ok(())
}
