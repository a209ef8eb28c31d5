use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for visa applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Raw material fetched for one applicant before the engine runs: the
/// application's destination hint, the user's app language, and the stored
/// questionnaire payload in whichever shape it was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantRecord {
    pub application_id: ApplicationId,
    pub country_hint: String,
    pub app_language: String,
    pub questionnaire_payload: Option<Value>,
}

/// Questionnaire store abstraction so the assessment service can be exercised
/// without the backing database.
pub trait ApplicantStore: Send + Sync {
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicantRecord>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("questionnaire store unavailable: {0}")]
    Unavailable(String),
}
