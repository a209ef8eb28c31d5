use super::super::experts::{ExpertFields, SufficiencyLabel, TiesLabel, TravelHistoryLabel};
use super::super::questionnaire::domain::{EmploymentStatus, QuestionnaireSummary};
use super::drivers::RiskDriver;
use super::{RiskAssessment, RiskLevel};

/// Every applicant starts at even odds; adjustments move the score from there.
pub const BASELINE_RISK_SCORE: i32 = 50;

/// Strong profiles are capped at the top of the medium band so a single
/// additive outlier cannot push an objectively strong applicant into high
/// risk.
const STRONG_PROFILE_CAP: i32 = 65;
const STRONG_PROFILE_RATIO: f64 = 1.3;

const LEVEL_LOW_MAX: i32 = 35;
const LEVEL_MEDIUM_MAX: i32 = 65;

/// Combine all signals into the final risk assessment.
///
/// A single deterministic additive pass over fixed, independently bounded
/// adjustments. The score is clamped to [0, 100], mapped onto the three-level
/// band at 35/65, and inverted into the public approval probability clamped
/// to [5, 95].
pub fn score_risk(
    expert: &ExpertFields,
    summary: &QuestionnaireSummary,
    drivers: &[RiskDriver],
) -> RiskAssessment {
    let mut score = BASELINE_RISK_SCORE;

    score += financial_adjustment(expert);
    if drivers.contains(&RiskDriver::BigFundsVsLowIncome) {
        score += 5;
    }

    score += ties_adjustment(expert.ties.score);
    score += employment_adjustment(summary);
    score += travel_adjustment(expert.travel_history.label);

    // Flat derogatory penalties. The refusal penalty deliberately ignores the
    // refusal count; the driver engine still scales with it.
    if summary.visa_refusal_count > 0 {
        score += 20;
    }
    if summary.has_overstayed {
        score += 30;
    }

    if drivers.contains(&RiskDriver::SponsorBasedFinance) {
        score += 5;
    }
    if drivers.contains(&RiskDriver::IsMinor) {
        score += 10;
    }

    let mut score = score.clamp(0, 100);

    if is_strong_profile(expert, summary) {
        score = score.min(STRONG_PROFILE_CAP);
    }

    let level = RiskLevel::for_score(score);
    let approval_probability_percent = (100 - score).clamp(5, 95) as u8;

    RiskAssessment {
        score: score as u8,
        level,
        approval_probability_percent,
        risk_factors: risk_factors(drivers),
        positive_factors: positive_factors(expert, summary),
        risk_drivers: drivers.to_vec(),
    }
}

fn financial_adjustment(expert: &ExpertFields) -> i32 {
    match expert.financial.sufficiency_ratio {
        // Unknown available funds carry a flat bump and nothing else.
        None => 5,
        Some(ratio) if ratio < 0.5 => 25,
        Some(ratio) if ratio < 0.8 => 15,
        Some(ratio) if ratio < 1.0 => 8,
        Some(ratio) if ratio < 1.3 => 0,
        Some(ratio) if ratio < 2.5 => -5,
        Some(_) => -8,
    }
}

fn ties_adjustment(score: f64) -> i32 {
    if score <= 0.3 {
        15
    } else if score <= 0.6 {
        0
    } else {
        -10
    }
}

fn employment_adjustment(summary: &QuestionnaireSummary) -> i32 {
    let status = summary.effective_employment();
    if !status.is_working() && status != EmploymentStatus::Student {
        return 8;
    }
    match summary.employment_tenure_months {
        Some(months) if months >= 12 => -5,
        Some(months) if months >= 6 => -3,
        _ => 0,
    }
}

fn travel_adjustment(label: TravelHistoryLabel) -> i32 {
    match label {
        TravelHistoryLabel::None => 15,
        TravelHistoryLabel::Limited => 7,
        TravelHistoryLabel::Good | TravelHistoryLabel::Strong => -5,
    }
}

fn is_strong_profile(expert: &ExpertFields, summary: &QuestionnaireSummary) -> bool {
    expert.ties.label == TiesLabel::Strong
        && expert
            .financial
            .sufficiency_ratio
            .map(|ratio| ratio >= STRONG_PROFILE_RATIO)
            .unwrap_or(false)
        && summary.visa_refusal_count == 0
        && !summary.has_overstayed
}

impl RiskLevel {
    /// Deterministic step function with fixed breakpoints at 35 and 65.
    pub fn for_score(score: i32) -> Self {
        if score <= LEVEL_LOW_MAX {
            RiskLevel::Low
        } else if score <= LEVEL_MEDIUM_MAX {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

/// Display strings derived 1:1 from the fired drivers.
fn risk_factors(drivers: &[RiskDriver]) -> Vec<String> {
    drivers
        .iter()
        .filter(|driver| **driver != RiskDriver::None)
        .map(|driver| driver.describe().to_string())
        .collect()
}

/// Strength statements shown next to the risks. Derived from the same expert
/// fields so the two lists never contradict each other.
fn positive_factors(expert: &ExpertFields, summary: &QuestionnaireSummary) -> Vec<String> {
    let mut factors = Vec::new();

    if matches!(
        expert.financial.label,
        Some(SufficiencyLabel::Sufficient) | Some(SufficiencyLabel::Strong)
    ) {
        factors.push("Funds meet or exceed the estimated requirement".to_string());
    }
    if expert.ties.label == TiesLabel::Strong {
        factors.push("Strong documented ties to the home country".to_string());
    }
    if summary.owns_property == Some(true) {
        factors.push("Owns property in the home country".to_string());
    }
    if summary.effective_employment().is_working() {
        factors.push("Currently employed".to_string());
    }
    if matches!(
        expert.travel_history.label,
        TravelHistoryLabel::Good | TravelHistoryLabel::Strong
    ) {
        factors.push("Prior international travel with a clean record".to_string());
    }
    if summary.visa_refusal_count == 0 && !summary.has_overstayed {
        factors.push("No previous refusals or immigration violations".to_string());
    }

    factors
}
