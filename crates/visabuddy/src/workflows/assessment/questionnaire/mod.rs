//! Questionnaire normalization.
//!
//! Raw payloads arrive in one of three shapes: the structured "2.0" format,
//! an embedded pre-computed summary, or the legacy free-form answers. Shape
//! detection is explicit (a tagged variant per shape plus `Unknown`) rather
//! than best-effort duck typing, and every fallback or default substitution
//! is recorded for provenance.

mod countries;
pub mod domain;
mod legacy;
mod v2;

use chrono::NaiveDate;
use serde_json::Value;

use domain::QuestionnaireSummary;
use serde::{Deserialize, Serialize};

/// Which normalization path produced the canonical summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    V2,
    Legacy,
    Hybrid,
    Unknown,
}

impl SourceFormat {
    pub const fn label(self) -> &'static str {
        match self {
            SourceFormat::V2 => "v2",
            SourceFormat::Legacy => "legacy",
            SourceFormat::Hybrid => "hybrid",
            SourceFormat::Unknown => "unknown",
        }
    }
}

/// Result of a successful normalization, carrying the provenance trail.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuestionnaire {
    pub summary: QuestionnaireSummary,
    pub source_format: SourceFormat,
    pub fallback_fields_used: Vec<String>,
    pub extraction_warnings: Vec<String>,
}

/// Normalization failures. Neither variant is fatal to a context build; the
/// assembler proceeds with the fully-defaulted summary and records a warning.
#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    #[error("payload does not match any known questionnaire shape")]
    UnrecognizedShape,
    #[error("payload declared the {format} shape but failed validation: {reason}")]
    SchemaViolation { format: &'static str, reason: String },
}

/// Accumulates which fields were resolved through secondary strategies or
/// defaults, plus soft warnings raised while probing the payload.
#[derive(Debug, Default)]
pub(crate) struct ExtractionLog {
    fallbacks: Vec<String>,
    warnings: Vec<String>,
}

impl ExtractionLog {
    /// A default or caller-supplied hint replaced a missing/ambiguous answer.
    fn fallback(&mut self, field: &str, source: &str) {
        self.fallbacks.push(format!("{field}:{source}"));
    }

    /// A secondary extraction strategy supplied the value.
    fn strategy(&mut self, field: &str, source: &str) {
        self.fallbacks.push(format!("{field}:{source}"));
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Detected payload shape. `Unknown` is an explicit outcome, not an error of
/// the detection itself.
enum DetectedShape {
    StructuredV2,
    EmbeddedSummary,
    Legacy,
    Unknown,
}

fn detect(payload: &Value) -> DetectedShape {
    let declares_v2 = payload
        .get("version")
        .and_then(Value::as_str)
        .map(|version| version == "2.0")
        .unwrap_or(false);
    let has_required_keys =
        payload.get("targetCountry").is_some() && payload.get("visaType").is_some();

    if declares_v2 && has_required_keys {
        return DetectedShape::StructuredV2;
    }
    if payload
        .get("questionnaireSummary")
        .map(Value::is_object)
        .unwrap_or(false)
        || has_required_keys
    {
        return DetectedShape::EmbeddedSummary;
    }
    if legacy::looks_like_legacy(payload) {
        return DetectedShape::Legacy;
    }
    DetectedShape::Unknown
}

/// Convert a raw payload into the canonical questionnaire summary.
///
/// `country_hint` is the destination recorded on the application itself and
/// backs the country fallback chain; `today` anchors age computation so the
/// pipeline stays deterministic under test.
pub fn normalize(
    payload: &Value,
    app_language: &str,
    country_hint: &str,
    today: NaiveDate,
) -> Result<NormalizedQuestionnaire, NormalizationError> {
    let mut log = ExtractionLog::default();

    let (summary, source_format) = match detect(payload) {
        DetectedShape::StructuredV2 => {
            let parsed: v2::SummaryPayload = serde_json::from_value(payload.clone())
                .map_err(|err| NormalizationError::SchemaViolation {
                    format: "structured v2",
                    reason: err.to_string(),
                })?;
            validate_required(&parsed, "structured v2")?;
            let summary = v2::map_summary(parsed, app_language, country_hint, today, &mut log);
            (summary, SourceFormat::V2)
        }
        DetectedShape::EmbeddedSummary => {
            let embedded = payload
                .get("questionnaireSummary")
                .unwrap_or(payload)
                .clone();
            let parsed: v2::SummaryPayload = serde_json::from_value(embedded).map_err(|err| {
                NormalizationError::SchemaViolation {
                    format: "embedded summary",
                    reason: err.to_string(),
                }
            })?;
            validate_required(&parsed, "embedded summary")?;
            let summary = v2::map_summary(parsed, app_language, country_hint, today, &mut log);
            (summary, SourceFormat::Hybrid)
        }
        DetectedShape::Legacy => {
            // Legacy conversion never hard-fails; unreadable answers degrade
            // to the defaults with a recorded warning.
            let parsed = match serde_json::from_value::<legacy::LegacyAnswers>(payload.clone()) {
                Ok(parsed) => parsed,
                Err(err) => {
                    log.warn(format!("legacy payload partially unreadable: {err}"));
                    legacy::LegacyAnswers::default()
                }
            };
            let summary = legacy::map_legacy(parsed, app_language, country_hint, today, &mut log);
            (summary, SourceFormat::Legacy)
        }
        DetectedShape::Unknown => return Err(NormalizationError::UnrecognizedShape),
    };

    Ok(NormalizedQuestionnaire {
        summary,
        source_format,
        fallback_fields_used: log.fallbacks,
        extraction_warnings: log.warnings,
    })
}

fn validate_required(
    payload: &v2::SummaryPayload,
    format: &'static str,
) -> Result<(), NormalizationError> {
    if payload.target_country.trim().is_empty() {
        return Err(NormalizationError::SchemaViolation {
            format,
            reason: "targetCountry must be non-empty".to_string(),
        });
    }
    Ok(())
}

/// Country resolution chain: ISO code as-is, then the fixed name lookup, then
/// the caller-supplied hint. Never an empty string.
pub(crate) fn resolve_country(raw: &str, country_hint: &str, log: &mut ExtractionLog) -> String {
    let trimmed = raw.trim();
    if countries::is_country_code(trimmed) {
        return trimmed.to_ascii_uppercase();
    }
    if let Some(code) = countries::code_for_name(trimmed) {
        log.strategy("target_country", "name_lookup");
        return code.to_string();
    }
    log.fallback("target_country", "hint");
    log.warn(format!(
        "could not resolve country '{trimmed}'; using application country"
    ));
    country_hint.to_string()
}
