//! RULE-BASED SCORER
//!
//! Additive linear policy around a baseline of 50 points:
//!
//! | term              | contribution                            |
//! |-------------------|-----------------------------------------|
//! | vegetation health | (ndvi_mean_12mo - 0.5) * 50             |
//! | trend             | ndvi_slope * 300                        |
//! | drought           | -min(rainfall_deficit_30day / 3, 20)    |
//! | variability       | -coefficient_of_variation * 30          |
//! | anomaly           | ndvi_anomaly_zscore * 5                 |
//! | soil carbon       | +min(soil_organic_carbon * 3, 10)       |
//!
//! The final score is clamped to [0, 100] and truncated.

use rand::Rng;
use std::ops::Range;

use super::{clamp_score, draw_confidence};
use crate::types::FarmAssessmentInput;

pub const BASE_SCORE: f64 = 50.0;
pub const DROUGHT_PENALTY_CAP: f64 = 20.0;
pub const SOIL_BONUS_CAP: f64 = 10.0;

/// Confidence range for rule-based predictions
pub const RULE_BASED_CONFIDENCE: Range<f64> = 0.75..0.90;

/// Unclamped rule-based score
pub fn rule_based_raw_score(input: &FarmAssessmentInput) -> f64 {
    let mut score = BASE_SCORE;

    score += (input.ndvi_mean_12mo - 0.5) * 50.0;
    score += input.ndvi_slope * 300.0;
    score -= (input.rainfall_deficit_30day / 3.0).min(DROUGHT_PENALTY_CAP);
    score -= input.coefficient_of_variation * 30.0;
    score += input.ndvi_anomaly_zscore * 5.0;
    score += (input.soil_organic_carbon * 3.0).min(SOIL_BONUS_CAP);

    score
}

/// Rule-based (score, confidence)
pub fn rule_based_prediction<R: Rng + ?Sized>(input: &FarmAssessmentInput, rng: &mut R) -> (u8, f64) {
    let score = clamp_score(rule_based_raw_score(input));
    let confidence = draw_confidence(rng, RULE_BASED_CONFIDENCE);
    (score, confidence)
}
