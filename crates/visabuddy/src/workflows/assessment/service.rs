use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::info;

use super::context::{build_context, CanonicalApplicantContext, ContextRequest};
use super::destination::DestinationCatalog;
use super::experts::InvariantViolation;
use super::store::{ApplicantStore, ApplicationId, StoreError};

/// Service composing the questionnaire store and the context pipeline.
///
/// The catalog is resolved once at startup and shared by reference; the
/// service itself holds no mutable state, so concurrent assessments need no
/// coordination.
pub struct AssessmentService<S> {
    store: Arc<S>,
    catalog: Arc<DestinationCatalog>,
}

impl<S> AssessmentService<S>
where
    S: ApplicantStore + 'static,
{
    pub fn new(store: Arc<S>, catalog: Arc<DestinationCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Build the canonical context for a stored application as of today.
    pub fn assess(
        &self,
        application_id: &ApplicationId,
    ) -> Result<CanonicalApplicantContext, AssessmentServiceError> {
        self.assess_at(application_id, Local::now().date_naive())
    }

    /// Build the canonical context with an injected assessment date, keeping
    /// the pipeline deterministic under test.
    pub fn assess_at(
        &self,
        application_id: &ApplicationId,
        today: NaiveDate,
    ) -> Result<CanonicalApplicantContext, AssessmentServiceError> {
        let record = self
            .store
            .fetch(application_id)?
            .ok_or_else(|| AssessmentServiceError::UnknownApplication(application_id.clone()))?;

        let context = build_context(
            ContextRequest {
                payload: record.questionnaire_payload.as_ref(),
                app_language: &record.app_language,
                country_hint: &record.country_hint,
                today,
            },
            &self.catalog,
        )?;

        info!(
            application_id = %application_id.0,
            source_format = context.provenance.source_format.label(),
            score = context.risk.score,
            level = context.risk.level.label(),
            "assembled applicant context"
        );

        Ok(context)
    }

    /// Build a context for an inline payload without touching the store.
    pub fn preview(
        &self,
        payload: Option<&Value>,
        app_language: &str,
        country_hint: &str,
        today: NaiveDate,
    ) -> Result<CanonicalApplicantContext, AssessmentServiceError> {
        let context = build_context(
            ContextRequest {
                payload,
                app_language,
                country_hint,
                today,
            },
            &self.catalog,
        )?;
        Ok(context)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("application '{}' not found", .0 .0)]
    UnknownApplication(ApplicationId),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
