use serde::{Deserialize, Serialize};

use super::super::questionnaire::domain::{MaritalStatus, QuestionnaireSummary};

/// Qualitative reading of the ties score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiesLabel {
    Weak,
    Medium,
    Strong,
}

impl TiesLabel {
    pub const fn label(self) -> &'static str {
        match self {
            TiesLabel::Weak => "weak",
            TiesLabel::Medium => "medium",
            TiesLabel::Strong => "strong",
        }
    }

    pub fn for_score(score: f64) -> Self {
        if score < 0.4 {
            TiesLabel::Weak
        } else if score < 0.7 {
            TiesLabel::Medium
        } else {
            TiesLabel::Strong
        }
    }
}

/// Individual contribution to the ties score, kept for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TiesFactor {
    PropertyOwned,
    EmployedAtHome,
    FamilyPresence,
    HasChildren,
    MarriedWithoutChildren,
}

impl TiesFactor {
    const fn weight(self) -> f64 {
        match self {
            TiesFactor::PropertyOwned => 0.3,
            TiesFactor::EmployedAtHome => 0.2,
            TiesFactor::FamilyPresence => 0.2,
            TiesFactor::HasChildren => 0.2,
            TiesFactor::MarriedWithoutChildren => 0.1,
        }
    }
}

/// Evidence of the applicant's anchoring to their home country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiesStrength {
    pub score: f64,
    pub label: TiesLabel,
    pub factors: Vec<TiesFactor>,
}

/// Additive ties score capped at 1.0.
pub fn assess_ties(summary: &QuestionnaireSummary) -> TiesStrength {
    let mut factors = Vec::new();

    if summary.owns_property == Some(true) {
        factors.push(TiesFactor::PropertyOwned);
    }
    if summary.effective_employment().is_working() {
        factors.push(TiesFactor::EmployedAtHome);
    }
    if summary.family_in_home_country == Some(true) {
        factors.push(TiesFactor::FamilyPresence);
    }
    if summary.has_children == Some(true) {
        factors.push(TiesFactor::HasChildren);
    } else if summary.marital_status == Some(MaritalStatus::Married) {
        factors.push(TiesFactor::MarriedWithoutChildren);
    }

    let score = factors
        .iter()
        .map(|factor| factor.weight())
        .sum::<f64>()
        .min(1.0);

    TiesStrength {
        score,
        label: TiesLabel::for_score(score),
        factors,
    }
}
