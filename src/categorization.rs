//! Risk band categorization.
//!
//! Bands are half-open on the low end:
//! - score < 30: High Risk
//! - 30 <= score < 60: Medium Risk
//! - score >= 60: Low Risk

use serde::Serialize;

/// Score below which an application is high risk
pub const HIGH_RISK_BELOW: u8 = 30;
/// Score below which an application is medium risk
pub const MEDIUM_RISK_BELOW: u8 = 60;

const HIGH_RISK_RECOMMENDATION: &str = "Loan application should be REJECTED or require additional collateral \
and high interest rate due to poor vegetation health, declining trends, \
and high environmental risk factors. Consider manual field assessment.";

const MEDIUM_RISK_RECOMMENDATION: &str = "Loan application can be APPROVED with STANDARD TERMS. Farm shows moderate \
vegetation health and stable production patterns. Monitor farm performance \
closely during the loan period and consider weather insurance.";

const LOW_RISK_RECOMMENDATION: &str = "Loan application should be APPROVED with FAVORABLE TERMS. Farm demonstrates \
excellent vegetation health, improving trends, and stable production patterns. \
Low probability of default. Consider offering lower interest rates.";

/// Risk band for a loan application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskCategory {
    HighRisk,
    MediumRisk,
    LowRisk,
}

impl RiskCategory {
    /// Categorize an integer risk score
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s < HIGH_RISK_BELOW => RiskCategory::HighRisk,
            s if s < MEDIUM_RISK_BELOW => RiskCategory::MediumRisk,
            _ => RiskCategory::LowRisk,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::HighRisk => "High Risk",
            RiskCategory::MediumRisk => "Medium Risk",
            RiskCategory::LowRisk => "Low Risk",
        }
    }

    /// Machine-readable tag (used as a CSS class by the web client)
    pub fn tag(&self) -> &'static str {
        match self {
            RiskCategory::HighRisk => "high-risk",
            RiskCategory::MediumRisk => "medium-risk",
            RiskCategory::LowRisk => "low-risk",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskCategory::HighRisk => HIGH_RISK_RECOMMENDATION,
            RiskCategory::MediumRisk => MEDIUM_RISK_RECOMMENDATION,
            RiskCategory::LowRisk => LOW_RISK_RECOMMENDATION,
        }
    }
}

/// Categorize a score. Shorthand for [`RiskCategory::from_score`].
pub fn categorize(score: u8) -> RiskCategory {
    RiskCategory::from_score(score)
}
