//! Canonical context assembly.
//!
//! Pure orchestration of the normalizer, the expert calculators, the driver
//! engine, and the scorer. The context is built fresh per request, never
//! cached, and superseded entirely when the source questionnaire changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::destination::DestinationCatalog;
use super::experts::{ExpertFields, InvariantViolation};
use super::questionnaire::domain::{QuestionnaireSummary, VisaType};
use super::questionnaire::{normalize, SourceFormat};
use super::risk::{compute_drivers, score_risk, RiskAssessment};

/// Inputs for one context build. `today` anchors age computation and is
/// injectable so identical inputs always produce identical contexts.
#[derive(Debug, Clone, Copy)]
pub struct ContextRequest<'a> {
    pub payload: Option<&'a Value>,
    pub app_language: &'a str,
    pub country_hint: &'a str,
    pub today: NaiveDate,
}

/// Where the canonical data came from and which substitutions were made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextProvenance {
    pub source_format: SourceFormat,
    pub fallback_fields_used: Vec<String>,
    pub extraction_warnings: Vec<String>,
}

/// The assembled, immutable bundle consumed by the checklist and explanation
/// generators. Consumers never reach back into raw questionnaire data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalApplicantContext {
    pub questionnaire: QuestionnaireSummary,
    pub expert_fields: ExpertFields,
    pub risk: RiskAssessment,
    pub provenance: ContextProvenance,
}

/// Build one canonical context.
///
/// Normalization failures and metadata gaps degrade to defaults with recorded
/// warnings; only a calculator contract violation aborts the build.
pub fn build_context(
    request: ContextRequest<'_>,
    catalog: &DestinationCatalog,
) -> Result<CanonicalApplicantContext, InvariantViolation> {
    let mut fallback_fields_used = Vec::new();
    let mut extraction_warnings = Vec::new();

    let (summary, source_format) = match request.payload {
        Some(payload) => match normalize(
            payload,
            request.app_language,
            request.country_hint,
            request.today,
        ) {
            Ok(normalized) => {
                fallback_fields_used.extend(normalized.fallback_fields_used);
                extraction_warnings.extend(normalized.extraction_warnings);
                (normalized.summary, normalized.source_format)
            }
            Err(err) => {
                extraction_warnings.push(err.to_string());
                (missing_summary(&request), SourceFormat::Unknown)
            }
        },
        None => {
            extraction_warnings.push("no questionnaire on file for this application".to_string());
            (missing_summary(&request), SourceFormat::Unknown)
        }
    };

    let lookup = catalog.resolve(&summary.target_country);
    if lookup.is_fallback {
        extraction_warnings.push(format!(
            "no cost metadata for '{}'; using the global default estimate",
            summary.target_country
        ));
    }

    if summary.visa_type == VisaType::Tourist && summary.stay_duration.is_none() {
        fallback_fields_used.push("stay_duration:default".to_string());
    }

    let expert_fields = ExpertFields::compute(&summary, lookup.profile);
    expert_fields.validate()?;

    let risk = if source_format == SourceFormat::Unknown {
        // Without any questionnaire data the verdict stays at the neutral
        // baseline instead of punishing every absent answer.
        extraction_warnings
            .push("risk estimate uses the neutral baseline: questionnaire data missing".to_string());
        RiskAssessment::baseline()
    } else {
        let drivers = compute_drivers(&expert_fields, &summary);
        score_risk(&expert_fields, &summary, &drivers)
    };

    Ok(CanonicalApplicantContext {
        questionnaire: summary,
        expert_fields,
        risk,
        provenance: ContextProvenance {
            source_format,
            fallback_fields_used,
            extraction_warnings,
        },
    })
}

fn missing_summary(request: &ContextRequest<'_>) -> QuestionnaireSummary {
    QuestionnaireSummary::missing(VisaType::Tourist, request.country_hint, request.app_language)
}
