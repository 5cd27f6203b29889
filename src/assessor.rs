//! Risk Assessor - decision point between model inference and rule-based scoring
//!
//! The assessor owns an optional, immutable model handle injected at
//! construction. For each farm it:
//! 1. encodes the crop (unknown crops default to maize)
//! 2. scores with the model, or with the rule-based scorer when there is no
//!    model or the model fails
//! 3. categorizes the integer score
//! 4. interprets the raw features
//!
//! Model failures never reach the caller. They are logged and recorded in
//! the returned `ScoringPath`.

use rand::Rng;
use rayon::prelude::*;
use std::fmt;
use std::sync::Arc;

use crate::crops::{encode_crop, Crop, EncodedCrop};
use crate::interpretation::interpret_features;
use crate::scoring::{
    draw_confidence, model_score, rule_based_prediction, FeatureVector, RiskModel, MODEL_CONFIDENCE,
};
use crate::types::{Assessment, FallbackReason, FarmAssessmentInput, RiskAssessmentResult, ScoringPath};

/// Farm loan risk assessor
#[derive(Clone)]
pub struct RiskAssessor {
    model: Option<Arc<dyn RiskModel>>,
}

impl RiskAssessor {
    pub fn new(model: Option<Arc<dyn RiskModel>>) -> Self {
        match &model {
            Some(m) => tracing::info!("Risk assessor using model '{}'", m.name()),
            None => tracing::info!("Risk assessor using rule-based scoring"),
        }
        Self { model }
    }

    /// Assessor without a trained model
    pub fn rule_based() -> Self {
        Self::new(None)
    }

    pub fn with_model(model: Arc<dyn RiskModel>) -> Self {
        Self::new(Some(model))
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_deref().map(|m| m.name())
    }

    /// Assess one validated farm record
    pub fn assess(&self, input: &FarmAssessmentInput) -> Assessment {
        self.assess_with_rng(input, &mut rand::thread_rng())
    }

    /// Assess with an explicit confidence source (seeded in tests)
    pub fn assess_with_rng<R: Rng + ?Sized>(&self, input: &FarmAssessmentInput, rng: &mut R) -> Assessment {
        let crop = encode_crop(&input.crop_type);
        if let EncodedCrop::DefaultedFrom(name) = &crop {
            tracing::debug!("Unknown crop type '{}', encoding as {}", name, Crop::DEFAULT.name());
        }

        let (risk_score, confidence, path) = match self.model.as_deref() {
            Some(model) => {
                let features = FeatureVector::from_input(input, &crop);
                match model_score(model, &features) {
                    Ok(score) => (
                        score,
                        draw_confidence(rng, MODEL_CONFIDENCE),
                        ScoringPath::Model { name: model.name().to_string() },
                    ),
                    Err(e) => {
                        tracing::warn!(
                            "Model '{}' failed ({}), falling back to rule-based scoring",
                            model.name(),
                            e
                        );
                        let (score, confidence) = rule_based_prediction(input, rng);
                        let reason = FallbackReason::ModelFailed(e.to_string());
                        (score, confidence, ScoringPath::RuleBased { reason })
                    }
                }
            }
            None => {
                let (score, confidence) = rule_based_prediction(input, rng);
                (score, confidence, ScoringPath::RuleBased { reason: FallbackReason::NoModel })
            }
        };

        tracing::debug!("Scored {} via {:?}", risk_score, path);

        Assessment {
            result: RiskAssessmentResult::new(risk_score, confidence, interpret_features(input)),
            path,
            crop,
        }
    }

    /// Assess many farms in parallel (Rayon), preserving input order
    pub fn assess_batch(&self, inputs: &[FarmAssessmentInput]) -> Vec<Assessment> {
        inputs.par_iter().map(|input| self.assess(input)).collect()
    }
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::rule_based()
    }
}

impl fmt::Debug for RiskAssessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskAssessor")
            .field("model", &self.model_name())
            .finish()
    }
}
