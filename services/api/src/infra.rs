use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use visabuddy::config::CatalogConfig;
use visabuddy::error::AppError;
use visabuddy::workflows::assessment::{
    ApplicantRecord, ApplicantStore, ApplicationId, DestinationCatalog, StoreError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory questionnaire store. The production backend owns persistence;
/// this stand-in keeps the service runnable for demos and tests.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantStore {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicantRecord>>>,
}

impl InMemoryApplicantStore {
    pub(crate) fn seed(&self, record: ApplicantRecord) {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(record.application_id.clone(), record);
    }

    pub(crate) fn with_demo_data() -> Self {
        let store = Self::default();
        store.seed(demo_tourist_record());
        store.seed(demo_student_record());
        store
    }
}

impl ApplicantStore for InMemoryApplicantStore {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicantRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

/// A settled, well-funded tourist applicant in the structured format.
pub(crate) fn demo_tourist_record() -> ApplicantRecord {
    ApplicantRecord {
        application_id: ApplicationId("demo-tourist".to_string()),
        country_hint: "US".to_string(),
        app_language: "en".to_string(),
        questionnaire_payload: Some(json!({
            "version": "2.0",
            "visaType": "tourist",
            "targetCountry": "US",
            "personal": { "age": 34, "maritalStatus": "married", "hasChildren": true },
            "finances": {
                "monthlyIncomeUsd": 3000.0,
                "bankBalanceUsd": 50000.0,
                "sponsorType": "self"
            },
            "employment": { "status": "employed", "employer": "Acme LLC", "tenureMonths": 48 },
            "trip": { "duration": "1_3_months", "accommodation": "hotel" },
            "travelHistory": {
                "visitedCountries": ["TR", "AE"],
                "refusalCount": 0,
                "hasOverstayed": false,
                "hasTraveledAbroad": true
            },
            "ties": { "ownsProperty": true, "familyInHomeCountry": true },
            "documents": ["passport", "bank_statement", "employment_letter"]
        })),
    }
}

/// A sponsored student applicant submitted through the legacy questionnaire.
pub(crate) fn demo_student_record() -> ApplicantRecord {
    ApplicantRecord {
        application_id: ApplicationId("demo-student".to_string()),
        country_hint: "DE".to_string(),
        app_language: "uz".to_string(),
        questionnaire_payload: Some(json!({
            "purpose": "study",
            "country": "Germany",
            "duration": "year",
            "financialSituation": "parents_sponsor",
            "monthlyIncome": 0.0,
            "savings": 1500.0,
            "sponsorIncome": 1800.0,
            "sponsorSavings": 12000.0,
            "employment": "student",
            "age": 19,
            "traveledAbroad": false,
            "ownsProperty": false,
            "familyAtHome": true,
            "documents": ["passport", "enrollment_proof"]
        })),
    }
}

pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<DestinationCatalog, AppError> {
    match &config.path {
        Some(path) => Ok(DestinationCatalog::from_path(path)?),
        None => Ok(DestinationCatalog::builtin()),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
