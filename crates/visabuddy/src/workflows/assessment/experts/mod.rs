//! Expert field calculators.
//!
//! Four independent pure functions over the canonical summary (plus the
//! destination profile for the financial one). They share no state and may
//! run in any order; `ExpertFields::compute` simply runs all four.

mod completeness;
mod financial;
mod ties;
mod travel;

pub use completeness::{assess_completeness, DataCompleteness, CRITICAL_FIELD_COUNT};
pub use financial::{
    assess_financial, FinancialSufficiency, SufficiencyLabel, INCOME_MONTHS_FACTOR,
    STUDENT_STAY_DAYS, TOURIST_BUFFER_USD,
};
pub use ties::{assess_ties, TiesFactor, TiesLabel, TiesStrength};
pub use travel::{assess_travel_history, TravelHistoryLabel, TravelHistoryStrength};

use serde::{Deserialize, Serialize};

use super::destination::DestinationProfile;
use super::questionnaire::domain::QuestionnaireSummary;

/// Derived signals consumed by the risk driver engine and the scorer. Never
/// persisted; rebuilt from the summary on every context build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertFields {
    pub financial: FinancialSufficiency,
    pub ties: TiesStrength,
    pub travel_history: TravelHistoryStrength,
    pub data_completeness: DataCompleteness,
}

/// A calculator produced a value outside its declared range. Fatal for the
/// affected context build; never silently clamped.
#[derive(Debug, thiserror::Error)]
#[error("expert field `{field}` outside its declared range: {value}")]
pub struct InvariantViolation {
    pub field: &'static str,
    pub value: f64,
}

impl ExpertFields {
    pub fn compute(summary: &QuestionnaireSummary, destination: &DestinationProfile) -> Self {
        Self {
            financial: assess_financial(summary, destination),
            ties: assess_ties(summary),
            travel_history: assess_travel_history(summary),
            data_completeness: assess_completeness(summary),
        }
    }

    /// Verify every score sits inside its declared closed interval.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        check_unit_interval("ties.score", self.ties.score)?;
        check_unit_interval("travel_history.score", self.travel_history.score)?;
        check_unit_interval("data_completeness.score", self.data_completeness.score)?;

        if self.financial.required_funds_usd < 0.0 {
            return Err(InvariantViolation {
                field: "financial.required_funds_usd",
                value: self.financial.required_funds_usd,
            });
        }
        if let Some(ratio) = self.financial.sufficiency_ratio {
            if !ratio.is_finite() || ratio < 0.0 {
                return Err(InvariantViolation {
                    field: "financial.sufficiency_ratio",
                    value: ratio,
                });
            }
        }
        Ok(())
    }
}

fn check_unit_interval(field: &'static str, value: f64) -> Result<(), InvariantViolation> {
    if !(0.0..=1.0).contains(&value) {
        return Err(InvariantViolation { field, value });
    }
    Ok(())
}
