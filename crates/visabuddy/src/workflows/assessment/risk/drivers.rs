use serde::{Deserialize, Serialize};

use super::super::experts::{ExpertFields, TiesLabel, TravelHistoryLabel};
use super::super::questionnaire::domain::{
    DocumentSet, EmploymentStatus, QuestionnaireSummary, SponsorType,
};

/// Available funds above this multiple of monthly income flag sudden
/// unexplained wealth.
pub const WEALTH_TO_INCOME_LIMIT: f64 = 24.0;
/// Applicants younger than this are flagged as minors.
pub const ADULT_AGE: u8 = 18;

const LOW_FUNDS_RATIO: f64 = 0.8;
const BORDERLINE_FUNDS_RATIO: f64 = 1.0;
const WEAK_TIES_SCORE: f64 = 0.3;

/// Named, independently-computed tag explaining one contributing factor to
/// the overall risk score. `None` is the explicit "nothing fired" sentinel,
/// distinct from an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDriver {
    LowFunds,
    BorderlineFunds,
    FundsUnknown,
    WeakTies,
    NoProperty,
    NoEmployment,
    LimitedTravelHistory,
    PreviousVisaRefusals,
    PreviousOverstay,
    IsMinor,
    SponsorBasedFinance,
    SelfEmployedWithoutProof,
    BigFundsVsLowIncome,
    None,
}

impl RiskDriver {
    pub const fn label(self) -> &'static str {
        match self {
            RiskDriver::LowFunds => "low_funds",
            RiskDriver::BorderlineFunds => "borderline_funds",
            RiskDriver::FundsUnknown => "funds_unknown",
            RiskDriver::WeakTies => "weak_ties",
            RiskDriver::NoProperty => "no_property",
            RiskDriver::NoEmployment => "no_employment",
            RiskDriver::LimitedTravelHistory => "limited_travel_history",
            RiskDriver::PreviousVisaRefusals => "previous_visa_refusals",
            RiskDriver::PreviousOverstay => "previous_overstay",
            RiskDriver::IsMinor => "is_minor",
            RiskDriver::SponsorBasedFinance => "sponsor_based_finance",
            RiskDriver::SelfEmployedWithoutProof => "self_employed_without_proof",
            RiskDriver::BigFundsVsLowIncome => "big_funds_vs_low_income",
            RiskDriver::None => "none",
        }
    }

    /// Display sentence shown to applicants as a main risk.
    pub const fn describe(self) -> &'static str {
        match self {
            RiskDriver::LowFunds => "Available funds fall well short of the estimated requirement",
            RiskDriver::BorderlineFunds => {
                "Available funds are close to but below the estimated requirement"
            }
            RiskDriver::FundsUnknown => "No verifiable financial information was provided",
            RiskDriver::WeakTies => "Few documented ties to the home country",
            RiskDriver::NoProperty => "No property ownership in the home country",
            RiskDriver::NoEmployment => "No current employment or study and no declared income",
            RiskDriver::LimitedTravelHistory => "Little or no prior international travel",
            RiskDriver::PreviousVisaRefusals => "Previous visa refusal on record",
            RiskDriver::PreviousOverstay => "Previous overstay on record",
            RiskDriver::IsMinor => "Applicant is under 18",
            RiskDriver::SponsorBasedFinance => "Trip finances depend on a sponsor",
            RiskDriver::SelfEmployedWithoutProof => {
                "Self-employed without income evidence or bank statements"
            }
            RiskDriver::BigFundsVsLowIncome => {
                "Declared funds are unusually large relative to income"
            }
            RiskDriver::None => "No specific risk drivers identified",
        }
    }
}

/// Evaluate every driver rule against the expert fields and raw flags.
///
/// Rules are independent; all that match are emitted in a fixed order with
/// duplicates suppressed. The result is never empty: the `none` sentinel
/// stands in when nothing fires.
pub fn compute_drivers(expert: &ExpertFields, summary: &QuestionnaireSummary) -> Vec<RiskDriver> {
    let mut drivers = Vec::new();

    match expert.financial.sufficiency_ratio {
        Some(ratio) if ratio < LOW_FUNDS_RATIO => push_unique(&mut drivers, RiskDriver::LowFunds),
        Some(ratio) if ratio < BORDERLINE_FUNDS_RATIO => {
            push_unique(&mut drivers, RiskDriver::BorderlineFunds)
        }
        _ => {}
    }

    let funds_unknown = match expert.financial.available_funds_usd {
        Some(available) => available <= 0.0,
        None => true,
    };
    if funds_unknown {
        push_unique(&mut drivers, RiskDriver::FundsUnknown);
    }

    if expert.ties.score <= WEAK_TIES_SCORE || expert.ties.label == TiesLabel::Weak {
        push_unique(&mut drivers, RiskDriver::WeakTies);
    }

    if summary.owns_property != Some(true) {
        push_unique(&mut drivers, RiskDriver::NoProperty);
    }

    let employment = summary.effective_employment();
    if employment == EmploymentStatus::Unemployed && !summary.has_income_evidence() {
        push_unique(&mut drivers, RiskDriver::NoEmployment);
    }

    if matches!(
        expert.travel_history.label,
        TravelHistoryLabel::None | TravelHistoryLabel::Limited
    ) {
        push_unique(&mut drivers, RiskDriver::LimitedTravelHistory);
    }

    if summary.visa_refusal_count > 0 {
        push_unique(&mut drivers, RiskDriver::PreviousVisaRefusals);
    }
    if summary.has_overstayed {
        push_unique(&mut drivers, RiskDriver::PreviousOverstay);
    }

    if summary.age.map(|age| age < ADULT_AGE).unwrap_or(false) {
        push_unique(&mut drivers, RiskDriver::IsMinor);
    }

    if summary
        .sponsor_type
        .map(|sponsor| sponsor != SponsorType::SelfFunded)
        .unwrap_or(false)
    {
        push_unique(&mut drivers, RiskDriver::SponsorBasedFinance);
    }

    if employment == EmploymentStatus::SelfEmployed
        && !summary.has_income_evidence()
        && !summary.documents.contains(DocumentSet::BANK_STATEMENT)
    {
        push_unique(&mut drivers, RiskDriver::SelfEmployedWithoutProof);
    }

    if let (Some(available), Some(income)) = (
        expert.financial.available_funds_usd,
        summary.monthly_income_usd,
    ) {
        if income > 0.0 && available / income > WEALTH_TO_INCOME_LIMIT {
            push_unique(&mut drivers, RiskDriver::BigFundsVsLowIncome);
        }
    }

    if drivers.is_empty() {
        drivers.push(RiskDriver::None);
    }
    drivers
}

fn push_unique(drivers: &mut Vec<RiskDriver>, driver: RiskDriver) {
    if !drivers.contains(&driver) {
        drivers.push(driver);
    }
}
