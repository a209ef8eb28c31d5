//! Canonical applicant context and risk scoring.
//!
//! Data flows strictly one direction: raw questionnaire → normalizer →
//! expert field calculators → risk driver engine → probability scorer →
//! context assembler. Every stage returns a new immutable value; nothing in
//! the pipeline performs I/O or holds shared mutable state.

pub mod context;
pub mod destination;
pub mod experts;
pub mod questionnaire;
pub mod risk;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use context::{build_context, CanonicalApplicantContext, ContextProvenance, ContextRequest};
pub use destination::{CatalogError, DestinationCatalog, DestinationLookup, DestinationProfile};
pub use experts::{
    DataCompleteness, ExpertFields, FinancialSufficiency, InvariantViolation, SufficiencyLabel,
    TiesFactor, TiesLabel, TiesStrength, TravelHistoryLabel, TravelHistoryStrength,
};
pub use questionnaire::domain::{
    AccommodationType, DocumentSet, EmploymentStatus, FundingSource, MaritalStatus,
    QuestionnaireSummary, SponsorType, StayDuration, VisaType,
};
pub use questionnaire::{normalize, NormalizationError, NormalizedQuestionnaire, SourceFormat};
pub use risk::{compute_drivers, score_risk, RiskAssessment, RiskDriver, RiskLevel};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
pub use store::{ApplicantRecord, ApplicantStore, ApplicationId, StoreError};
