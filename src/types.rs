//! Shared data types for farm risk assessment.
//!
//! `FarmAssessmentInput` mirrors the request body of the prediction endpoint
//! and the column layout of the training data. `RiskAssessmentResult` is the
//! response body.

use serde::{Deserialize, Serialize};

use crate::categorization::RiskCategory;
use crate::crops::EncodedCrop;
use crate::interpretation::FeatureInterpretation;

/// One farm loan application with its remote-sensing, weather and soil features.
///
/// Ranges are checked by [`crate::validation::validate`] at the boundary;
/// scoring code assumes they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmAssessmentInput {
    /// Farm latitude, [-90, 90]
    pub latitude: f64,
    /// Farm longitude, [-180, 180]
    pub longitude: f64,
    /// Primary crop type (free-form, case-insensitive)
    pub crop_type: String,
    /// Farm area in hectares, > 0
    pub farm_area_hectares: f64,
    /// 12-month average NDVI, [0, 1]
    pub ndvi_mean_12mo: f64,
    /// NDVI trend slope
    pub ndvi_slope: f64,
    /// 14-day NDVI change
    pub ndvi_14day_delta: f64,
    /// NDVI anomaly z-score
    pub ndvi_anomaly_zscore: f64,
    /// 30-day rainfall deficit in mm, >= 0
    pub rainfall_deficit_30day: f64,
    /// NDVI coefficient of variation, [0, 1]
    pub coefficient_of_variation: f64,
    /// Soil organic carbon (%), >= 0
    pub soil_organic_carbon: f64,
    /// Requested loan amount, > 0
    pub loan_amount_usd: f64,
}

impl FarmAssessmentInput {
    /// Smallholder maize farm near Nairobi, used as the API example payload.
    pub fn example() -> Self {
        Self {
            latitude: -1.2921,
            longitude: 36.8219,
            crop_type: "maize".to_string(),
            farm_area_hectares: 2.5,
            ndvi_mean_12mo: 0.72,
            ndvi_slope: 0.015,
            ndvi_14day_delta: -0.02,
            ndvi_anomaly_zscore: -0.35,
            rainfall_deficit_30day: 15.2,
            coefficient_of_variation: 0.18,
            soil_organic_carbon: 1.8,
            loan_amount_usd: 1500.0,
        }
    }
}

/// Assessment returned to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessmentResult {
    /// Risk score 0-100 (HIGH = creditworthy)
    pub risk_score: u8,
    /// "High Risk" / "Medium Risk" / "Low Risk"
    #[serde(serialize_with = "serialize_category_label")]
    pub risk_category: RiskCategory,
    /// Machine-readable tag ("high-risk", ...)
    pub category_class: &'static str,
    pub recommendation: &'static str,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,
    pub features: FeatureInterpretation,
}

impl RiskAssessmentResult {
    pub fn new(
        risk_score: u8,
        confidence: f64,
        features: FeatureInterpretation,
    ) -> Self {
        let risk_category = RiskCategory::from_score(risk_score);
        Self {
            risk_score,
            risk_category,
            category_class: risk_category.tag(),
            recommendation: risk_category.recommendation(),
            confidence,
            features,
        }
    }
}

fn serialize_category_label<S>(category: &RiskCategory, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(category.label())
}

/// Confidence is reported to three decimals
fn serialize_confidence<S>(confidence: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64((confidence * 1000.0).round() / 1000.0)
}

/// Which scorer produced the risk score
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringPath {
    /// Trained model prediction
    Model { name: String },
    /// Rule-based fallback, with the reason the model was not used
    RuleBased { reason: FallbackReason },
}

impl ScoringPath {
    pub fn is_model(&self) -> bool {
        matches!(self, ScoringPath::Model { .. })
    }
}

/// Why an assessment was scored by the rule-based scorer
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// No model was injected into the assessor
    NoModel,
    /// The model returned an error or a non-finite value
    ModelFailed(String),
}

/// Result plus the telemetry that never reaches the response body
#[derive(Debug, Clone)]
pub struct Assessment {
    pub result: RiskAssessmentResult,
    pub path: ScoringPath,
    pub crop: EncodedCrop,
}
