//! Trained-model scoring path.
//!
//! The model is an opaque capability: it takes the ten-column feature vector
//! and returns a scalar score. Column order is fixed by `FEATURE_COLUMNS`; the
//! model was trained on this order and reordering silently corrupts
//! predictions.

use std::ops::Range;
use thiserror::Error;

use super::clamp_score;
use crate::crops::EncodedCrop;
use crate::types::FarmAssessmentInput;

/// Number of model input columns
pub const N_FEATURES: usize = 10;

/// Model input columns, in training order
pub const FEATURE_COLUMNS: [&str; N_FEATURES] = [
    "farm_area_hectares",
    "ndvi_mean_12mo",
    "ndvi_slope",
    "ndvi_14day_delta",
    "ndvi_anomaly_zscore",
    "rainfall_deficit_30day",
    "coefficient_of_variation",
    "soil_organic_carbon",
    "crop_type_encoded",
    "loan_amount_usd",
];

/// Confidence range for model-backed predictions
pub const MODEL_CONFIDENCE: Range<f64> = 0.85..0.95;

/// Errors raised by a model during prediction
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model returned a non-finite prediction ({0})")]
    NonFinite(f64),

    #[error("feature index {0} is out of range")]
    FeatureIndex(usize),

    #[error("model panicked during prediction")]
    Panicked,

    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Ordered model input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    /// Build the feature vector for one farm
    pub fn from_input(input: &FarmAssessmentInput, crop: &EncodedCrop) -> Self {
        Self([
            input.farm_area_hectares,
            input.ndvi_mean_12mo,
            input.ndvi_slope,
            input.ndvi_14day_delta,
            input.ndvi_anomaly_zscore,
            input.rainfall_deficit_30day,
            input.coefficient_of_variation,
            input.soil_organic_carbon,
            f64::from(crop.code()),
            input.loan_amount_usd,
        ])
    }

    pub fn from_array(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// (column name, value) pairs, for logging
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

/// Interface for trained risk models.
///
/// Implementations are shared read-only across concurrent requests.
pub trait RiskModel: Send + Sync {
    /// Predict a raw risk score (nominally 0-100, unclamped)
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    /// Model name for logs and health checks
    fn name(&self) -> &str;
}

/// Run the model and turn its output into an integer score.
///
/// Panics inside the model are caught and reported as `ModelError::Panicked`.
pub fn model_score(model: &dyn RiskModel, features: &FeatureVector) -> Result<u8, ModelError> {
    let raw = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| model.predict(features)))
        .map_err(|_| ModelError::Panicked)??;

    if !raw.is_finite() {
        return Err(ModelError::NonFinite(raw));
    }

    Ok(clamp_score(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crops::encode_crop;

    struct ConstantModel(f64);

    impl RiskModel for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "constant"
        }
    }

    #[test]
    fn test_feature_vector_order() {
        let input = FarmAssessmentInput::example();
        let fv = FeatureVector::from_input(&input, &encode_crop("coffee"));

        assert_eq!(
            fv.as_slice(),
            &[2.5, 0.72, 0.015, -0.02, -0.35, 15.2, 0.18, 1.8, 2.0, 1500.0]
        );
        let names: Vec<&str> = fv.named().map(|(name, _)| name).collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
    }

    #[test]
    fn test_unknown_crop_encodes_as_zero_in_vector() {
        let input = FarmAssessmentInput::example();
        let fv = FeatureVector::from_input(&input, &encode_crop("quinoa"));
        assert_eq!(fv.get(8), Some(0.0));
        assert_eq!(fv.get(N_FEATURES), None);
    }

    #[test]
    fn test_model_score_clamps_and_truncates() {
        let fv = FeatureVector::from_array([0.0; N_FEATURES]);
        assert_eq!(model_score(&ConstantModel(72.9), &fv).unwrap(), 72);
        assert_eq!(model_score(&ConstantModel(-4.0), &fv).unwrap(), 0);
        assert_eq!(model_score(&ConstantModel(140.2), &fv).unwrap(), 100);
    }

    #[test]
    fn test_model_score_rejects_non_finite() {
        let fv = FeatureVector::from_array([0.0; N_FEATURES]);
        assert!(matches!(
            model_score(&ConstantModel(f64::NAN), &fv),
            Err(ModelError::NonFinite(_))
        ));
        assert!(matches!(
            model_score(&ConstantModel(f64::INFINITY), &fv),
            Err(ModelError::NonFinite(_))
        ));
    }
}
