use serde::{Deserialize, Serialize};

use super::super::destination::DestinationProfile;
use super::super::questionnaire::domain::{QuestionnaireSummary, VisaType};

/// Flat buffer added on top of daily costs for tourist trips.
pub const TOURIST_BUFFER_USD: f64 = 500.0;
/// Months of income counted toward available funds.
pub const INCOME_MONTHS_FACTOR: f64 = 2.5;
/// Student plans are costed for a full academic year.
pub const STUDENT_STAY_DAYS: f64 = 365.0;

/// Qualitative reading of the sufficiency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SufficiencyLabel {
    Low,
    Borderline,
    Sufficient,
    Strong,
}

impl SufficiencyLabel {
    pub const fn label(self) -> &'static str {
        match self {
            SufficiencyLabel::Low => "low",
            SufficiencyLabel::Borderline => "borderline",
            SufficiencyLabel::Sufficient => "sufficient",
            SufficiencyLabel::Strong => "strong",
        }
    }

    /// Fixed thresholds over the sufficiency ratio.
    pub fn for_ratio(ratio: f64) -> Self {
        if ratio < 0.7 {
            SufficiencyLabel::Low
        } else if ratio < 1.0 {
            SufficiencyLabel::Borderline
        } else if ratio < 1.3 {
            SufficiencyLabel::Sufficient
        } else {
            SufficiencyLabel::Strong
        }
    }
}

/// Estimated funds position for the requested trip or study plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSufficiency {
    pub required_funds_usd: f64,
    pub available_funds_usd: Option<f64>,
    /// `None` when available funds are unknown; treated as neutral downstream.
    pub sufficiency_ratio: Option<f64>,
    pub label: Option<SufficiencyLabel>,
}

/// Estimate required and available funds and their ratio.
///
/// Tourist trips are costed per representative stay day plus a flat buffer;
/// student plans add the destination's annual tuition estimate and a full
/// year of living costs.
pub fn assess_financial(
    summary: &QuestionnaireSummary,
    destination: &DestinationProfile,
) -> FinancialSufficiency {
    let required_funds_usd = match summary.visa_type {
        VisaType::Tourist => {
            let days = summary.effective_stay_duration().representative_days() as f64;
            destination.daily_cost(VisaType::Tourist) * days + TOURIST_BUFFER_USD
        }
        VisaType::Student => {
            destination.annual_tuition_usd
                + destination.daily_cost(VisaType::Student) * STUDENT_STAY_DAYS
        }
    };

    let available_funds_usd = available_funds(summary);
    let sufficiency_ratio = available_funds_usd.and_then(|available| {
        if required_funds_usd > 0.0 {
            Some(available / required_funds_usd)
        } else {
            None
        }
    });

    FinancialSufficiency {
        required_funds_usd,
        available_funds_usd,
        sufficiency_ratio,
        label: sufficiency_ratio.map(SufficiencyLabel::for_ratio),
    }
}

/// Sum of the known funding components. `None` when the questionnaire gave no
/// financial figures at all, which downstream treats as "funds unknown" rather
/// than zero.
fn available_funds(summary: &QuestionnaireSummary) -> Option<f64> {
    let mut total = 0.0;
    let mut any_known = false;

    if let Some(balance) = summary.bank_balance_usd {
        total += balance;
        any_known = true;
    }
    if let Some(income) = summary.monthly_income_usd {
        total += income * INCOME_MONTHS_FACTOR;
        any_known = true;
    }

    if !summary.effective_sponsor().is_self_funded() {
        if let Some(balance) = summary.sponsor_bank_balance_usd {
            total += balance;
            any_known = true;
        }
        if let Some(income) = summary.sponsor_monthly_income_usd {
            total += income * INCOME_MONTHS_FACTOR;
            any_known = true;
        }
    }

    any_known.then_some(total)
}
