//! Risk drivers and the deterministic probability scorer.

mod drivers;
mod scorer;

pub use drivers::{compute_drivers, RiskDriver, ADULT_AGE, WEALTH_TO_INCOME_LIMIT};
pub use scorer::{score_risk, BASELINE_RISK_SCORE};

use serde::{Deserialize, Serialize};

/// Three-level risk band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Deterministic, explainable risk verdict for one applicant.
///
/// `score` is risk (higher is worse), not approval probability; the public
/// `approval_probability_percent` is its clamped inverse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub approval_probability_percent: u8,
    pub risk_drivers: Vec<RiskDriver>,
    pub risk_factors: Vec<String>,
    pub positive_factors: Vec<String>,
}

impl RiskAssessment {
    /// Neutral verdict used when no questionnaire data is available at all.
    pub fn baseline() -> Self {
        let score = BASELINE_RISK_SCORE as u8;
        Self {
            score,
            level: RiskLevel::for_score(BASELINE_RISK_SCORE),
            approval_probability_percent: (100 - BASELINE_RISK_SCORE).clamp(5, 95) as u8,
            risk_drivers: vec![RiskDriver::None],
            risk_factors: Vec::new(),
            positive_factors: Vec::new(),
        }
    }
}
