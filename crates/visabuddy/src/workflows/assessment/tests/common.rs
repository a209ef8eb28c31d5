use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::assessment::context::{build_context, CanonicalApplicantContext, ContextRequest};
use crate::workflows::assessment::destination::DestinationCatalog;
use crate::workflows::assessment::service::AssessmentService;
use crate::workflows::assessment::store::{
    ApplicantRecord, ApplicantStore, ApplicationId, StoreError,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 1).expect("valid date")
}

pub(super) fn catalog() -> DestinationCatalog {
    DestinationCatalog::builtin()
}

/// Scenario payload: underfunded first-time tourist with no anchors at home.
pub(super) fn high_risk_tourist_payload() -> Value {
    json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "finances": {
            "monthlyIncomeUsd": 0.0,
            "bankBalanceUsd": 1000.0,
            "sponsorType": "self"
        },
        "trip": { "duration": "1_3_months" },
        "travelHistory": {
            "visitedCountries": [],
            "refusalCount": 0,
            "hasOverstayed": false,
            "hasTraveledAbroad": false
        },
        "ties": { "ownsProperty": false, "familyInHomeCountry": false }
    })
}

/// Scenario payload: well-funded, settled applicant with a clean record.
pub(super) fn strong_profile_payload() -> Value {
    json!({
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
        "trip": { "duration": "1_3_months" },
        "travelHistory": {
            "visitedCountries": ["TR", "AE"],
            "refusalCount": 0,
            "hasOverstayed": false,
            "hasTraveledAbroad": true
        },
        "ties": { "ownsProperty": true, "familyInHomeCountry": true },
        "documents": ["passport", "bank_statement", "employment_letter"]
    })
}

/// Legacy answers equivalent to [`high_risk_tourist_payload`].
pub(super) fn high_risk_legacy_payload() -> Value {
    json!({
        "purpose": "tourism",
        "country": "United States",
        "duration": "few_months",
        "financialSituation": "self_funded",
        "monthlyIncome": 0.0,
        "savings": 1000.0,
        "employment": "unemployed",
        "ownsProperty": false,
        "familyAtHome": false,
        "traveledAbroad": false
    })
}

pub(super) fn build(payload: &Value) -> CanonicalApplicantContext {
    let catalog = catalog();
    build_context(
        ContextRequest {
            payload: Some(payload),
            app_language: "en",
            country_hint: "US",
            today: today(),
        },
        &catalog,
    )
    .expect("context builds")
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicantRecord>>>,
}

impl MemoryStore {
    pub(super) fn seed(&self, record: ApplicantRecord) {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .insert(record.application_id.clone(), record);
    }
}

impl ApplicantStore for MemoryStore {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicantRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct UnavailableStore;

impl ApplicantStore for UnavailableStore {
    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicantRecord>, StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AssessmentService::new(store.clone(), Arc::new(catalog()));
    (service, store)
}

pub(super) fn applicant_record(id: &str, payload: Option<Value>) -> ApplicantRecord {
    ApplicantRecord {
        application_id: ApplicationId(id.to_string()),
        country_hint: "US".to_string(),
        app_language: "en".to_string(),
        questionnaire_payload: payload,
    }
}
