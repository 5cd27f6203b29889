//! Batch scoring of farm records from CSV
//!
//! Reads farm records laid out like the training data (one column per
//! `FarmAssessmentInput` field) with Polars, validates each row, and
//! summarizes a batch of assessments.

use anyhow::{Context, Result};
use polars::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

use crate::types::{Assessment, FarmAssessmentInput};
use crate::validation::{validate, ValidationErrors};

/// Numeric input columns. Integer-typed CSV columns are cast to Float64.
const NUMERIC_COLUMNS: [&str; 11] = [
    "latitude",
    "longitude",
    "farm_area_hectares",
    "ndvi_mean_12mo",
    "ndvi_slope",
    "ndvi_14day_delta",
    "ndvi_anomaly_zscore",
    "rainfall_deficit_30day",
    "coefficient_of_variation",
    "soil_organic_carbon",
    "loan_amount_usd",
];

/// Load farm records from a CSV file
pub fn load_farm_records(path: &Path) -> Result<Vec<FarmAssessmentInput>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open CSV file: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to parse CSV file: {:?}", path))?;

    farm_records_from_frame(&df)
}

/// Convert a DataFrame with the input columns into farm records
pub fn farm_records_from_frame(df: &DataFrame) -> Result<Vec<FarmAssessmentInput>> {
    let mut numeric: Vec<Float64Chunked> = Vec::with_capacity(NUMERIC_COLUMNS.len());
    for name in NUMERIC_COLUMNS {
        let column = df
            .column(name)
            .with_context(|| format!("Missing column '{}'", name))?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        numeric.push(column.f64()?.clone());
    }

    let crops = df
        .column("crop_type")
        .with_context(|| "Missing column 'crop_type'")?
        .cast(&DataType::String)?;
    let crops = crops.str()?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut values = [0.0; NUMERIC_COLUMNS.len()];
        for (i, ca) in numeric.iter().enumerate() {
            values[i] = ca.get(row).with_context(|| {
                format!("Row {}: missing value for '{}'", row, NUMERIC_COLUMNS[i])
            })?;
        }
        let crop_type = crops.get(row).unwrap_or_default().to_string();

        let [latitude, longitude, farm_area_hectares, ndvi_mean_12mo, ndvi_slope, ndvi_14day_delta, ndvi_anomaly_zscore, rainfall_deficit_30day, coefficient_of_variation, soil_organic_carbon, loan_amount_usd] =
            values;

        records.push(FarmAssessmentInput {
            latitude,
            longitude,
            crop_type,
            farm_area_hectares,
            ndvi_mean_12mo,
            ndvi_slope,
            ndvi_14day_delta,
            ndvi_anomaly_zscore,
            rainfall_deficit_30day,
            coefficient_of_variation,
            soil_organic_carbon,
            loan_amount_usd,
        });
    }

    Ok(records)
}

/// A row that failed boundary validation
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    pub row: usize,
    pub errors: ValidationErrors,
}

/// Split records into (row index, valid record) pairs and rejections
pub fn partition_valid(
    records: Vec<FarmAssessmentInput>,
) -> (Vec<(usize, FarmAssessmentInput)>, Vec<RejectedRecord>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (row, record) in records.into_iter().enumerate() {
        match validate(&record) {
            Ok(()) => valid.push((row, record)),
            Err(errors) => rejected.push(RejectedRecord { row, errors }),
        }
    }

    (valid, rejected)
}

/// Aggregate view of a batch of assessments
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    /// Count per category tag ("high-risk", ...)
    pub by_category: FxHashMap<&'static str, usize>,
    pub model_scored: usize,
    pub rule_based: usize,
    pub defaulted_crops: usize,
    pub mean_score: Option<f64>,
}

impl BatchSummary {
    pub fn from_assessments(assessments: &[Assessment]) -> Self {
        let mut summary = BatchSummary {
            total: assessments.len(),
            ..Default::default()
        };
        let mut score_sum = 0u64;

        for a in assessments {
            *summary.by_category.entry(a.result.category_class).or_insert(0) += 1;
            if a.path.is_model() {
                summary.model_scored += 1;
            } else {
                summary.rule_based += 1;
            }
            if a.crop.is_defaulted() {
                summary.defaulted_crops += 1;
            }
            score_sum += u64::from(a.result.risk_score);
        }

        if !assessments.is_empty() {
            summary.mean_score = Some(score_sum as f64 / assessments.len() as f64);
        }

        summary
    }

    pub fn count(&self, tag: &str) -> usize {
        self.by_category.get(tag).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessor::RiskAssessor;
    use approx::assert_relative_eq;
    use std::fs;

    const HEADER: &str = "latitude,longitude,crop_type,farm_area_hectares,ndvi_mean_12mo,ndvi_slope,ndvi_14day_delta,ndvi_anomaly_zscore,rainfall_deficit_30day,coefficient_of_variation,soil_organic_carbon,loan_amount_usd";

    fn write_csv(name: &str, rows: &[&str]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("fieldscore_{}_{}.csv", name, std::process::id()));
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        contents.push('\n');
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_farm_records_casts_integer_columns() {
        let path = write_csv(
            "load",
            &[
                "-1.2921,36.8219,maize,2.5,0.72,0.015,-0.02,-0.35,15.2,0.18,1.8,1500",
                "0.3476,32.5825,Coffee,4,0.55,-0.02,0.01,0.4,42,0.33,2.6,3200",
            ],
        );

        let records = load_farm_records(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], FarmAssessmentInput::example());
        assert_eq!(records[1].crop_type, "Coffee");
        assert_relative_eq!(records[1].farm_area_hectares, 4.0);
        assert_relative_eq!(records[1].rainfall_deficit_30day, 42.0);
        assert_relative_eq!(records[1].loan_amount_usd, 3200.0);
    }

    #[test]
    fn test_load_farm_records_missing_column() {
        let path = std::env::temp_dir().join(format!("fieldscore_nocol_{}.csv", std::process::id()));
        fs::write(&path, "latitude,longitude\n1.0,2.0\n").unwrap();
        let err = load_farm_records(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(format!("{:#}", err).contains("Missing column"));
    }

    #[test]
    fn test_partition_valid_reports_rows() {
        let mut bad = FarmAssessmentInput::example();
        bad.ndvi_mean_12mo = 1.4;
        let records = vec![FarmAssessmentInput::example(), bad, FarmAssessmentInput::example()];

        let (valid, rejected) = partition_valid(records);
        assert_eq!(valid.iter().map(|(row, _)| *row).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].row, 1);
        assert_eq!(rejected[0].errors.0[0].field, "ndvi_mean_12mo");
    }

    #[test]
    fn test_batch_summary_counts() {
        let assessor = RiskAssessor::rule_based();
        let mut poor = FarmAssessmentInput::example();
        poor.ndvi_mean_12mo = 0.2;
        poor.rainfall_deficit_30day = 90.0;
        poor.crop_type = "quinoa".to_string();
        let mut strong = FarmAssessmentInput::example();
        strong.ndvi_slope = 0.05;

        let assessments = assessor.assess_batch(&[FarmAssessmentInput::example(), poor, strong]);
        let summary = BatchSummary::from_assessments(&assessments);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.count("medium-risk"), 1);
        assert_eq!(summary.count("high-risk"), 1);
        assert_eq!(summary.count("low-risk"), 1);
        assert_eq!(summary.rule_based, 3);
        assert_eq!(summary.model_scored, 0);
        assert_eq!(summary.defaulted_crops, 1);
        assert!(summary.mean_score.is_some());
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_assessments(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.mean_score, None);
    }
}
