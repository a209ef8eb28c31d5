//! Heuristic conversion of the legacy free-form questionnaire.
//!
//! The legacy frontend collected loosely-typed answers. Every mapping below
//! has a named canonical target; ambiguous or missing answers take the most
//! conservative value and the substitution is recorded on the extraction log.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::domain::{
    AccommodationType, DocumentSet, EmploymentStatus, MaritalStatus, QuestionnaireSummary,
    SponsorType, StayDuration, VisaType,
};
use super::{resolve_country, ExtractionLog};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LegacyAnswers {
    pub(crate) purpose: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) duration: Option<String>,
    pub(crate) financial_situation: Option<String>,
    pub(crate) monthly_income: Option<f64>,
    pub(crate) savings: Option<f64>,
    pub(crate) sponsor_income: Option<f64>,
    pub(crate) sponsor_savings: Option<f64>,
    pub(crate) employment: Option<String>,
    pub(crate) employer: Option<String>,
    pub(crate) study_program: Option<String>,
    pub(crate) months_at_job: Option<u32>,
    pub(crate) marital_status: Option<String>,
    pub(crate) has_children: Option<bool>,
    pub(crate) age: Option<u8>,
    pub(crate) birth_year: Option<i32>,
    pub(crate) citizenship: Option<String>,
    #[serde(default)]
    pub(crate) visited_countries: Vec<String>,
    pub(crate) visa_refusals: Option<u32>,
    pub(crate) refused_before: Option<bool>,
    pub(crate) overstayed: Option<bool>,
    pub(crate) traveled_abroad: Option<bool>,
    pub(crate) owns_property: Option<bool>,
    pub(crate) family_at_home: Option<bool>,
    pub(crate) accommodation: Option<String>,
    #[serde(default)]
    pub(crate) documents: Vec<String>,
}

/// True when the payload carries at least one recognizable legacy key.
pub(crate) fn looks_like_legacy(payload: &serde_json::Value) -> bool {
    ["purpose", "country", "duration", "financialSituation"]
        .iter()
        .any(|key| payload.get(key).is_some())
}

pub(crate) fn map_legacy(
    answers: LegacyAnswers,
    app_language: &str,
    country_hint: &str,
    today: NaiveDate,
    log: &mut ExtractionLog,
) -> QuestionnaireSummary {
    let visa_type = match answers.purpose.as_deref().map(str::trim) {
        Some(purpose) if !purpose.is_empty() => visa_type_for_purpose(purpose),
        _ => {
            log.fallback("visa_type", "default");
            VisaType::Tourist
        }
    };

    let target_country = match answers.country.as_deref().map(str::trim) {
        Some(country) if !country.is_empty() => resolve_country(country, country_hint, log),
        _ => {
            log.fallback("target_country", "hint");
            country_hint.to_string()
        }
    };

    let stay_duration = answers.duration.as_deref().and_then(|raw| {
        let bucket = duration_bucket(raw);
        if bucket.is_none() {
            log.warn(format!("unrecognized legacy duration '{}'", raw.trim()));
        }
        bucket
    });

    let sponsor_type = answers.financial_situation.as_deref().map(|raw| {
        sponsor_for_situation(raw).unwrap_or_else(|| {
            log.fallback("sponsor_type", "default");
            SponsorType::SelfFunded
        })
    });

    let employment_status = answers.employment.as_deref().map(|raw| {
        employment_for_answer(raw).unwrap_or_else(|| {
            log.fallback("employment_status", "default");
            EmploymentStatus::Unemployed
        })
    });

    // Age strategies, first hit wins: explicit answer, then birth year.
    let age = match (answers.age, answers.birth_year) {
        (Some(age), _) => Some(age),
        (None, Some(year)) => {
            log.strategy("age", "birth_year");
            Some((today.year() - year).clamp(0, u8::MAX as i32) as u8)
        }
        (None, None) => None,
    };

    // Refusal strategies: explicit count, then the coarse yes/no flag.
    let visa_refusal_count = match (answers.visa_refusals, answers.refused_before) {
        (Some(count), _) => count,
        (None, Some(true)) => {
            log.strategy("visa_refusal_count", "refused_flag");
            1
        }
        _ => 0,
    };

    let marital_status = answers
        .marital_status
        .as_deref()
        .and_then(marital_for_answer);

    let accommodation = answers
        .accommodation
        .as_deref()
        .and_then(accommodation_for_answer);

    let mut documents = DocumentSet::empty();
    for name in &answers.documents {
        match DocumentSet::flag_for(name) {
            Some(flag) => documents.insert(flag),
            None => log.warn(format!("unknown document name '{name}' ignored")),
        }
    }

    QuestionnaireSummary {
        visa_type,
        target_country,
        app_language: app_language.to_string(),
        citizenship: answers.citizenship,
        age,
        marital_status,
        has_children: answers.has_children,
        monthly_income_usd: answers.monthly_income,
        bank_balance_usd: answers.savings,
        sponsor_type,
        sponsor_monthly_income_usd: answers.sponsor_income,
        sponsor_bank_balance_usd: answers.sponsor_savings,
        employment_status,
        employer: answers.employer,
        study_program: answers.study_program,
        employment_tenure_months: answers.months_at_job,
        stay_duration,
        funding_source: None,
        accommodation,
        visited_countries: answers.visited_countries,
        visa_refusal_count,
        has_overstayed: answers.overstayed.unwrap_or(false),
        has_traveled_abroad: answers.traveled_abroad,
        owns_property: answers.owns_property,
        family_in_home_country: answers.family_at_home,
        documents,
    }
}

fn visa_type_for_purpose(purpose: &str) -> VisaType {
    let normalized = purpose.trim().to_ascii_lowercase();
    if normalized.contains("study") || normalized.contains("student") {
        VisaType::Student
    } else {
        VisaType::Tourist
    }
}

fn duration_bucket(raw: &str) -> Option<StayDuration> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "days" | "week" | "1_week" | "short" => Some(StayDuration::UnderTwoWeeks),
        "two_weeks" | "2_weeks" | "month" | "1_month" => Some(StayDuration::TwoToFourWeeks),
        "few_months" | "1_3_months" | "quarter" => Some(StayDuration::OneToThreeMonths),
        "3_6_months" | "half_year" => Some(StayDuration::ThreeToSixMonths),
        "year" | "over_6_months" | "long" => Some(StayDuration::OverSixMonths),
        _ => None,
    }
}

fn sponsor_for_situation(raw: &str) -> Option<SponsorType> {
    let normalized = raw.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    if normalized == "self"
        || normalized.contains("self_funded")
        || normalized.contains("own_funds")
        || normalized.contains("savings")
    {
        return Some(SponsorType::SelfFunded);
    }
    if normalized.contains("parent") || normalized.contains("family") {
        return Some(SponsorType::Family);
    }
    if normalized.contains("employer") || normalized.contains("company") {
        return Some(SponsorType::Employer);
    }
    if normalized.contains("scholarship") || normalized.contains("grant") {
        return Some(SponsorType::Scholarship);
    }
    if normalized.contains("sponsor") {
        return Some(SponsorType::Other);
    }
    None
}

fn employment_for_answer(raw: &str) -> Option<EmploymentStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "employed" | "full_time" | "part_time" => Some(EmploymentStatus::Employed),
        "self_employed" | "business" | "freelance" => Some(EmploymentStatus::SelfEmployed),
        "student" => Some(EmploymentStatus::Student),
        "unemployed" | "none" => Some(EmploymentStatus::Unemployed),
        "retired" | "pension" => Some(EmploymentStatus::Retired),
        _ => None,
    }
}

fn marital_for_answer(raw: &str) -> Option<MaritalStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "single" => Some(MaritalStatus::Single),
        "married" => Some(MaritalStatus::Married),
        "divorced" => Some(MaritalStatus::Divorced),
        "widowed" => Some(MaritalStatus::Widowed),
        _ => None,
    }
}

fn accommodation_for_answer(raw: &str) -> Option<AccommodationType> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "hotel" => Some(AccommodationType::Hotel),
        "rental" | "apartment" => Some(AccommodationType::Rental),
        "family" | "friends" | "relatives" => Some(AccommodationType::FamilyOrFriends),
        "dormitory" | "university" | "campus" => Some(AccommodationType::UniversityHousing),
        "other" => Some(AccommodationType::Other),
        _ => None,
    }
}
