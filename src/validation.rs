//! Boundary validation for farm assessment requests.
//!
//! Runs before a record reaches the assessor; scoring code never
//! re-validates. All violations are collected, not just the first.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::types::FarmAssessmentInput;

/// One out-of-range field
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{field} = {value} is out of range (expected {expected})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

/// Every violation found in one record
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} invalid field(s): {}", self.0.len(), joined)
    }
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Closed(f64, f64),
    Positive,
    NonNegative,
    Finite,
}

impl Bound {
    fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            Bound::Closed(lo, hi) => (lo..=hi).contains(&value),
            Bound::Positive => value > 0.0,
            Bound::NonNegative => value >= 0.0,
            Bound::Finite => true,
        }
    }
}

/// Field name, bound, and the text shown when the bound is violated
fn field_bounds(input: &FarmAssessmentInput) -> [(&'static str, f64, Bound, &'static str); 11] {
    [
        ("latitude", input.latitude, Bound::Closed(-90.0, 90.0), "[-90, 90]"),
        ("longitude", input.longitude, Bound::Closed(-180.0, 180.0), "[-180, 180]"),
        ("farm_area_hectares", input.farm_area_hectares, Bound::Positive, "> 0"),
        ("ndvi_mean_12mo", input.ndvi_mean_12mo, Bound::Closed(0.0, 1.0), "[0, 1]"),
        ("ndvi_slope", input.ndvi_slope, Bound::Finite, "a finite number"),
        ("ndvi_14day_delta", input.ndvi_14day_delta, Bound::Finite, "a finite number"),
        ("ndvi_anomaly_zscore", input.ndvi_anomaly_zscore, Bound::Finite, "a finite number"),
        ("rainfall_deficit_30day", input.rainfall_deficit_30day, Bound::NonNegative, ">= 0"),
        ("coefficient_of_variation", input.coefficient_of_variation, Bound::Closed(0.0, 1.0), "[0, 1]"),
        ("soil_organic_carbon", input.soil_organic_carbon, Bound::NonNegative, ">= 0"),
        ("loan_amount_usd", input.loan_amount_usd, Bound::Positive, "> 0"),
    ]
}

/// Check every bounded field of `input`
pub fn validate(input: &FarmAssessmentInput) -> Result<(), ValidationErrors> {
    let errors: Vec<ValidationError> = field_bounds(input)
        .into_iter()
        .filter(|(_, value, bound, _)| !bound.accepts(*value))
        .map(|(field, value, _, expected)| ValidationError { field, value, expected })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
