//! Feature interpretation for human-readable output.
//!
//! Four independent threshold ladders, evaluated top-down (first match wins).
//! Labels are informational and never feed back into the score.

use serde::Serialize;
use std::fmt;

use crate::types::FarmAssessmentInput;

// ============================================================================
// Vegetation health (12-month mean NDVI)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VegetationHealth {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Classify vegetation health from 12-month mean NDVI.
/// - > 0.7: Excellent
/// - > 0.6: Good
/// - > 0.5: Fair
/// - else: Poor
pub fn classify_vegetation_health(ndvi_mean: f64) -> VegetationHealth {
    if ndvi_mean > 0.7 {
        VegetationHealth::Excellent
    } else if ndvi_mean > 0.6 {
        VegetationHealth::Good
    } else if ndvi_mean > 0.5 {
        VegetationHealth::Fair
    } else {
        VegetationHealth::Poor
    }
}

// ============================================================================
// Trend direction (NDVI slope)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Slopes within ±0.01 are stable
pub const TREND_DEADBAND: f64 = 0.01;

pub fn classify_trend(ndvi_slope: f64) -> TrendDirection {
    if ndvi_slope > TREND_DEADBAND {
        TrendDirection::Improving
    } else if ndvi_slope < -TREND_DEADBAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    }
}

// ============================================================================
// Drought status (30-day rainfall deficit, mm)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DroughtStatus {
    Low,
    Moderate,
    Severe,
}

/// - < 30mm: Low
/// - < 60mm: Moderate
/// - else: Severe
pub fn classify_drought(rainfall_deficit_mm: f64) -> DroughtStatus {
    if rainfall_deficit_mm < 30.0 {
        DroughtStatus::Low
    } else if rainfall_deficit_mm < 60.0 {
        DroughtStatus::Moderate
    } else {
        DroughtStatus::Severe
    }
}

// ============================================================================
// Production stability (NDVI coefficient of variation)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductionStability {
    High,
    Moderate,
    Low,
}

pub fn classify_stability(coefficient_of_variation: f64) -> ProductionStability {
    if coefficient_of_variation < 0.25 {
        ProductionStability::High
    } else if coefficient_of_variation < 0.4 {
        ProductionStability::Moderate
    } else {
        ProductionStability::Low
    }
}

/// Qualitative labels for one farm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureInterpretation {
    pub ndvi_health: VegetationHealth,
    pub trend: TrendDirection,
    pub drought_status: DroughtStatus,
    pub stability: ProductionStability,
}

pub fn interpret_features(input: &FarmAssessmentInput) -> FeatureInterpretation {
    FeatureInterpretation {
        ndvi_health: classify_vegetation_health(input.ndvi_mean_12mo),
        trend: classify_trend(input.ndvi_slope),
        drought_status: classify_drought(input.rainfall_deficit_30day),
        stability: classify_stability(input.coefficient_of_variation),
    }
}

impl fmt::Display for FeatureInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vegetation {:?}, trend {:?}, drought {:?}, stability {:?}",
            self.ndvi_health, self.trend, self.drought_status, self.stability
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vegetation_health_ladder() {
        assert_eq!(classify_vegetation_health(0.85), VegetationHealth::Excellent);
        assert_eq!(classify_vegetation_health(0.71), VegetationHealth::Excellent);
        assert_eq!(classify_vegetation_health(0.65), VegetationHealth::Good);
        assert_eq!(classify_vegetation_health(0.55), VegetationHealth::Fair);
        assert_eq!(classify_vegetation_health(0.2), VegetationHealth::Poor);
    }

    #[test]
    fn test_vegetation_health_boundaries_are_strict() {
        // Exactly on a threshold falls to the lower label
        assert_eq!(classify_vegetation_health(0.70), VegetationHealth::Good);
        assert_eq!(classify_vegetation_health(0.60), VegetationHealth::Fair);
        assert_eq!(classify_vegetation_health(0.50), VegetationHealth::Poor);
    }

    #[test]
    fn test_trend_deadband() {
        assert_eq!(classify_trend(0.015), TrendDirection::Improving);
        assert_eq!(classify_trend(0.01), TrendDirection::Stable);
        assert_eq!(classify_trend(0.0), TrendDirection::Stable);
        assert_eq!(classify_trend(-0.01), TrendDirection::Stable);
        assert_eq!(classify_trend(-0.02), TrendDirection::Declining);
    }

    #[test]
    fn test_drought_boundaries() {
        assert_eq!(classify_drought(0.0), DroughtStatus::Low);
        assert_eq!(classify_drought(29.9), DroughtStatus::Low);
        assert_eq!(classify_drought(30.0), DroughtStatus::Moderate);
        assert_eq!(classify_drought(59.9), DroughtStatus::Moderate);
        assert_eq!(classify_drought(60.0), DroughtStatus::Severe);
    }

    #[test]
    fn test_stability_boundaries() {
        assert_eq!(classify_stability(0.18), ProductionStability::High);
        assert_eq!(classify_stability(0.25), ProductionStability::Moderate);
        assert_eq!(classify_stability(0.4), ProductionStability::Low);
        assert_eq!(classify_stability(1.0), ProductionStability::Low);
    }

    #[test]
    fn test_interpret_features_serializes_labels() {
        let mut input = FarmAssessmentInput::example();
        input.ndvi_mean_12mo = 0.45;
        input.ndvi_slope = -0.03;
        input.rainfall_deficit_30day = 75.0;
        input.coefficient_of_variation = 0.3;

        let json = serde_json::to_value(interpret_features(&input)).unwrap();
        assert_eq!(json["ndvi_health"], "Poor");
        assert_eq!(json["trend"], "Declining");
        assert_eq!(json["drought_status"], "Severe");
        assert_eq!(json["stability"], "Moderate");
    }
}
