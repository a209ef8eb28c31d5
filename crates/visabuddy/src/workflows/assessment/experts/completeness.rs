use serde::{Deserialize, Serialize};

use super::super::questionnaire::domain::QuestionnaireSummary;

/// The seven answers the scoring model depends on most. The boolean flags
/// always count as present because downstream consumption defaults them to
/// `false`; only the numeric/enum fields can genuinely be missing.
pub const CRITICAL_FIELD_COUNT: usize = 7;

/// Share of critical fields the questionnaire actually answered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataCompleteness {
    pub score: f64,
    pub missing_critical_fields: Vec<String>,
}

pub fn assess_completeness(summary: &QuestionnaireSummary) -> DataCompleteness {
    let mut missing = Vec::new();

    if summary.bank_balance_usd.is_none() {
        missing.push("bank_balance".to_string());
    }
    if summary.monthly_income_usd.is_none() {
        missing.push("monthly_income".to_string());
    }
    if summary.sponsor_type.is_none() {
        missing.push("sponsor_type".to_string());
    }
    if summary.employment_status.is_none() {
        missing.push("employment_status".to_string());
    }

    // owns_property, family_in_home_country, and has_traveled_abroad are the
    // three always-present boolean criticals.
    let present = CRITICAL_FIELD_COUNT - missing.len();
    let score = present as f64 / CRITICAL_FIELD_COUNT as f64;

    DataCompleteness {
        score,
        missing_critical_fields: missing,
    }
}
