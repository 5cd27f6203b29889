//! Scoring paths for farm risk assessment
//!
//! - `rule_based`: deterministic additive scorer used when no model is available
//! - `model`: the `RiskModel` abstraction and feature-vector contract
//! - `tree_ensemble`: exported gradient-boosted tree ensemble (JSON artifact)
//!
//! Both paths clamp to [0, 100] and truncate toward zero.

pub mod model;
pub mod rule_based;
pub mod tree_ensemble;

pub use model::{model_score, FeatureVector, ModelError, RiskModel, FEATURE_COLUMNS, MODEL_CONFIDENCE};
pub use rule_based::{rule_based_prediction, rule_based_raw_score, RULE_BASED_CONFIDENCE};
pub use tree_ensemble::{load_optional_model, RegressionTree, TreeEnsembleModel, TreeNode};

use rand::Rng;
use std::ops::Range;

/// Clamp a raw score to [0, 100] and truncate toward zero
pub fn clamp_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0) as u8
}

/// Draw a confidence value uniformly from `range`.
///
/// Confidence is not derived from the inputs or the model; each scoring path
/// only fixes its own range.
pub fn draw_confidence<R: Rng + ?Sized>(rng: &mut R, range: Range<f64>) -> f64 {
    rng.gen_range(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clamp_score_truncates() {
        assert_eq!(clamp_score(58.68), 58);
        assert_eq!(clamp_score(59.999), 59);
        assert_eq!(clamp_score(0.4), 0);
    }

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(-250.0), 0);
        assert_eq!(clamp_score(1e9), 100);
        assert_eq!(clamp_score(100.0), 100);
        assert_eq!(clamp_score(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_draw_confidence_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = draw_confidence(&mut rng, RULE_BASED_CONFIDENCE);
            assert!((0.75..0.90).contains(&c));
            let c = draw_confidence(&mut rng, MODEL_CONFIDENCE);
            assert!((0.85..0.95).contains(&c));
        }
    }
}
