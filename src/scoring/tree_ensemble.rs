//! Gradient-boosted regression tree ensemble
//!
//! Evaluates a tree ensemble exported from the training pipeline as JSON:
//!
//! ```json
//! {
//!   "name": "risk_score_regressor",
//!   "base_score": 50.0,
//!   "feature_names": ["farm_area_hectares", "ndvi_mean_12mo", ...],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 1, "threshold": 0.6, "left": 1, "right": 2 },
//!         { "leaf": -3.5 },
//!         { "leaf": 4.0 }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Prediction = base_score + sum of one leaf per tree. A split sends
//! `x < threshold` left, everything else right. Node 0 is the root and every
//! child index is greater than its parent's, so evaluation always terminates.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::model::{FeatureVector, ModelError, RiskModel, FEATURE_COLUMNS, N_FEATURES};

/// One tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: f64,
    },
}

/// Single regression tree, nodes in evaluation order (root first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    fn evaluate(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let x = features
                        .get(*feature)
                        .ok_or(ModelError::FeatureIndex(*feature))?;
                    let next = if x < *threshold { *left } else { *right };
                    if next <= idx {
                        return Err(ModelError::Prediction(format!(
                            "node {} points back to node {}",
                            idx, next
                        )));
                    }
                    idx = next;
                }
                Some(TreeNode::Leaf { leaf }) => return Ok(*leaf),
                None => {
                    return Err(ModelError::Prediction(format!("node {} does not exist", idx)));
                }
            }
        }
    }

    fn check(&self) -> Result<()> {
        if self.nodes.is_empty() {
            anyhow::bail!("tree has no nodes");
        }
        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= N_FEATURES {
                        anyhow::bail!("node {} splits on unknown feature {}", i, feature);
                    }
                    if !threshold.is_finite() {
                        anyhow::bail!("node {} has non-finite threshold", i);
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= n {
                            anyhow::bail!("node {} has invalid child index {}", i, child);
                        }
                    }
                }
                TreeNode::Leaf { leaf } => {
                    if !leaf.is_finite() {
                        anyhow::bail!("node {} has non-finite leaf value", i);
                    }
                }
            }
        }
        Ok(())
    }
}

fn default_model_name() -> String {
    "tree_ensemble".to_string()
}

/// Exported tree ensemble regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsembleModel {
    #[serde(default = "default_model_name")]
    name: String,
    base_score: f64,
    feature_names: Vec<String>,
    trees: Vec<RegressionTree>,
}

impl TreeEnsembleModel {
    /// Build an ensemble over `FEATURE_COLUMNS`
    pub fn new(name: &str, base_score: f64, trees: Vec<RegressionTree>) -> Result<Self> {
        let model = Self {
            name: name.to_string(),
            base_score,
            feature_names: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
            trees,
        };
        model.check()?;
        Ok(model)
    }

    /// Load an ensemble from a JSON artifact
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read model file: {:?}", path))?;

        Self::from_json(&contents).with_context(|| format!("Invalid model file: {:?}", path))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let model: TreeEnsembleModel =
            serde_json::from_str(json).with_context(|| "Failed to parse model JSON")?;
        model.check()?;
        Ok(model)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn check(&self) -> Result<()> {
        // Column order is part of the model's input contract
        if self.feature_names != FEATURE_COLUMNS {
            anyhow::bail!(
                "Feature columns {:?} do not match expected order {:?}",
                self.feature_names,
                FEATURE_COLUMNS
            );
        }
        if !self.base_score.is_finite() {
            anyhow::bail!("base_score is not finite");
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.check().with_context(|| format!("tree {}", t))?;
        }
        Ok(())
    }
}

impl RiskModel for TreeEnsembleModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        self.trees
            .iter()
            .try_fold(self.base_score, |acc, tree| -> Result<f64, ModelError> {
                Ok(acc + tree.evaluate(features)?)
            })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Load the model at `path` if there is one.
///
/// A missing file or an invalid artifact is not fatal: the caller runs in
/// rule-based mode.
pub fn load_optional_model(path: &Path) -> Option<Arc<dyn RiskModel>> {
    if !path.exists() {
        tracing::info!("Model not found at {:?}. Using rule-based prediction.", path);
        return None;
    }

    match TreeEnsembleModel::load(path) {
        Ok(model) => {
            tracing::info!(
                "Model '{}' loaded from {:?} ({} trees)",
                model.name(),
                path,
                model.n_trees()
            );
            Some(Arc::new(model))
        }
        Err(e) => {
            tracing::warn!("Error loading model: {:#}. Using rule-based prediction.", e);
            None
        }
    }
}
