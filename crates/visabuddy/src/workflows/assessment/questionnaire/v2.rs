//! Structured "2.0" questionnaire payloads and the embedded pre-computed
//! summary shape share the same section layout; this module owns both.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::domain::{
    AccommodationType, DocumentSet, EmploymentStatus, FundingSource, MaritalStatus,
    QuestionnaireSummary, SponsorType, StayDuration, VisaType,
};
use super::{resolve_country, ExtractionLog};

/// Wire shape produced by the current questionnaire frontend. Field names are
/// camelCase because the surrounding product is a JS backend.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SummaryPayload {
    pub(crate) visa_type: VisaType,
    pub(crate) target_country: String,
    #[serde(default)]
    pub(crate) personal: PersonalSection,
    #[serde(default)]
    pub(crate) finances: FinanceSection,
    #[serde(default)]
    pub(crate) employment: EmploymentSection,
    #[serde(default)]
    pub(crate) trip: TripSection,
    #[serde(default)]
    pub(crate) travel_history: TravelHistorySection,
    #[serde(default)]
    pub(crate) ties: TiesSection,
    #[serde(default)]
    pub(crate) documents: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PersonalSection {
    pub(crate) citizenship: Option<String>,
    pub(crate) age: Option<u8>,
    pub(crate) date_of_birth: Option<NaiveDate>,
    pub(crate) marital_status: Option<MaritalStatus>,
    pub(crate) has_children: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FinanceSection {
    pub(crate) monthly_income_usd: Option<f64>,
    pub(crate) bank_balance_usd: Option<f64>,
    pub(crate) sponsor_type: Option<SponsorType>,
    pub(crate) sponsor_monthly_income_usd: Option<f64>,
    pub(crate) sponsor_bank_balance_usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmploymentSection {
    pub(crate) status: Option<EmploymentStatus>,
    pub(crate) employer: Option<String>,
    pub(crate) study_program: Option<String>,
    pub(crate) tenure_months: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TripSection {
    pub(crate) duration: Option<StayDuration>,
    pub(crate) funding_source: Option<FundingSource>,
    pub(crate) accommodation: Option<AccommodationType>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TravelHistorySection {
    #[serde(default)]
    pub(crate) visited_countries: Vec<String>,
    pub(crate) refusal_count: Option<u32>,
    pub(crate) has_overstayed: Option<bool>,
    pub(crate) has_traveled_abroad: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TiesSection {
    pub(crate) owns_property: Option<bool>,
    pub(crate) family_in_home_country: Option<bool>,
}

/// Map a validated structured payload onto the canonical summary.
///
/// Each field with more than one source is resolved through an ordered
/// strategy chain; secondary strategies and substituted defaults are recorded
/// on the extraction log.
pub(crate) fn map_summary(
    payload: SummaryPayload,
    app_language: &str,
    country_hint: &str,
    today: NaiveDate,
    log: &mut ExtractionLog,
) -> QuestionnaireSummary {
    let target_country = resolve_country(&payload.target_country, country_hint, log);

    // Age strategies, first hit wins: explicit answer, then date of birth.
    let age = match (payload.personal.age, payload.personal.date_of_birth) {
        (Some(age), _) => Some(age),
        (None, Some(date_of_birth)) => {
            log.strategy("age", "date_of_birth");
            Some(age_from_birth_date(date_of_birth, today))
        }
        (None, None) => None,
    };

    let mut documents = DocumentSet::empty();
    for name in &payload.documents {
        match DocumentSet::flag_for(name) {
            Some(flag) => documents.insert(flag),
            None => log.warn(format!("unknown document name '{name}' ignored")),
        }
    }

    QuestionnaireSummary {
        visa_type: payload.visa_type,
        target_country,
        app_language: app_language.to_string(),
        citizenship: payload.personal.citizenship,
        age,
        marital_status: payload.personal.marital_status,
        has_children: payload.personal.has_children,
        monthly_income_usd: payload.finances.monthly_income_usd,
        bank_balance_usd: payload.finances.bank_balance_usd,
        sponsor_type: payload.finances.sponsor_type,
        sponsor_monthly_income_usd: payload.finances.sponsor_monthly_income_usd,
        sponsor_bank_balance_usd: payload.finances.sponsor_bank_balance_usd,
        employment_status: payload.employment.status,
        employer: payload.employment.employer,
        study_program: payload.employment.study_program,
        employment_tenure_months: payload.employment.tenure_months,
        stay_duration: payload.trip.duration,
        funding_source: payload.trip.funding_source,
        accommodation: payload.trip.accommodation,
        visited_countries: payload.travel_history.visited_countries,
        visa_refusal_count: payload.travel_history.refusal_count.unwrap_or(0),
        has_overstayed: payload.travel_history.has_overstayed.unwrap_or(false),
        has_traveled_abroad: payload.travel_history.has_traveled_abroad,
        owns_property: payload.ties.owns_property,
        family_in_home_country: payload.ties.family_in_home_country,
        documents,
    }
}

fn age_from_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> u8 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.clamp(0, u8::MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_counts_completed_years() {
        let born = NaiveDate::from_ymd_opt(1995, 6, 15).expect("valid date");
        let before_birthday = NaiveDate::from_ymd_opt(2026, 6, 14).expect("valid date");
        let after_birthday = NaiveDate::from_ymd_opt(2026, 6, 15).expect("valid date");
        assert_eq!(age_from_birth_date(born, before_birthday), 30);
        assert_eq!(age_from_birth_date(born, after_birthday), 31);
    }
}
