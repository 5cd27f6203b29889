//! FieldScore: agricultural loan risk scoring
//!
//! Turns satellite-derived vegetation indices, rainfall and soil indicators
//! for a smallholder farm into a 0-100 creditworthiness score (high = safer),
//! a risk category with a lending recommendation, and a plain-language
//! reading of the inputs.
//!
//! - `crops`: crop name → integer code table
//! - `scoring/`: rule-based scorer, `RiskModel` trait, tree-ensemble model
//! - `categorization`: score → category, tag, recommendation
//! - `interpretation`: qualitative labels for the raw features
//! - `assessor`: model-or-fallback decision point
//! - `validation`, `batch`: boundary checks and CSV batch scoring
//! - `api_server` (feature `api`): Axum HTTP surface

pub mod assessor;
pub mod batch;
pub mod categorization;
pub mod crops;
pub mod interpretation;
pub mod scoring;
pub mod types;
pub mod validation;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use assessor::RiskAssessor;
pub use batch::{load_farm_records, BatchSummary};
pub use categorization::{categorize, RiskCategory};
pub use crops::{encode_crop, Crop, EncodedCrop};
pub use interpretation::{interpret_features, FeatureInterpretation};
pub use scoring::{load_optional_model, FeatureVector, ModelError, RiskModel, TreeEnsembleModel};
pub use types::{Assessment, FallbackReason, FarmAssessmentInput, RiskAssessmentResult, ScoringPath};
pub use validation::{validate, ValidationError, ValidationErrors};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
