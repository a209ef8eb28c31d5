use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::service::{AssessmentService, AssessmentServiceError};
use super::store::{ApplicantStore, ApplicationId};

/// Router builder exposing the context assembly endpoints.
pub fn assessment_router<S>(service: Arc<AssessmentService<S>>) -> Router
where
    S: ApplicantStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments/:application_id",
            get(assessment_handler::<S>),
        )
        .route("/api/v1/assessments/preview", post(preview_handler::<S>))
        .with_state(service)
}

pub(crate) async fn assessment_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicantStore + 'static,
{
    let id = ApplicationId(application_id);
    match service.assess(&id) {
        Ok(context) => (StatusCode::OK, axum::Json(context)).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PreviewRequest {
    pub(crate) country: String,
    #[serde(default = "default_language")]
    pub(crate) app_language: String,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) questionnaire: Option<serde_json::Value>,
}

fn default_language() -> String {
    "en".to_string()
}

pub(crate) async fn preview_handler<S>(
    State(service): State<Arc<AssessmentService<S>>>,
    axum::Json(request): axum::Json<PreviewRequest>,
) -> Response
where
    S: ApplicantStore + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    match service.preview(
        request.questionnaire.as_ref(),
        &request.app_language,
        &request.country,
        today,
    ) {
        Ok(context) => (StatusCode::OK, axum::Json(context)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = match &err {
        AssessmentServiceError::UnknownApplication(_) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        AssessmentServiceError::Invariant(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
