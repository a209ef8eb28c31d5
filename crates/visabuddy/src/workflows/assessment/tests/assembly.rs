use serde_json::json;

use super::common::*;
use crate::workflows::assessment::context::{build_context, ContextRequest};
use crate::workflows::assessment::questionnaire::SourceFormat;
use crate::workflows::assessment::risk::{RiskDriver, RiskLevel, BASELINE_RISK_SCORE};

#[test]
fn identical_inputs_produce_byte_identical_contexts() {
    let payload = strong_profile_payload();

    let first = build(&payload);
    let second = build(&payload);

    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).expect("serialize");
    let second_json = serde_json::to_string(&second).expect("serialize");
    assert_eq!(first_json, second_json);
}

#[test]
fn missing_questionnaire_yields_baseline_context() {
    let catalog = catalog();
    let context = build_context(
        ContextRequest {
            payload: None,
            app_language: "ru",
            country_hint: "US",
            today: today(),
        },
        &catalog,
    )
    .expect("context builds");

    assert_eq!(context.provenance.source_format, SourceFormat::Unknown);
    assert_eq!(context.risk.score, BASELINE_RISK_SCORE as u8);
    assert_eq!(context.risk.level, RiskLevel::Medium);
    assert_eq!(context.risk.risk_drivers, vec![RiskDriver::None]);
    assert_eq!(context.questionnaire.target_country, "US");
    assert_eq!(context.questionnaire.app_language, "ru");
    assert!(context
        .provenance
        .extraction_warnings
        .iter()
        .any(|warning| warning.contains("questionnaire data missing")));
}

#[test]
fn unrecognized_payload_degrades_to_baseline_with_warning() {
    let catalog = catalog();
    let payload = json!({ "totally": "unrelated" });

    let context = build_context(
        ContextRequest {
            payload: Some(&payload),
            app_language: "en",
            country_hint: "GB",
            today: today(),
        },
        &catalog,
    )
    .expect("context builds");

    assert_eq!(context.provenance.source_format, SourceFormat::Unknown);
    assert_eq!(context.risk.score, BASELINE_RISK_SCORE as u8);
    assert!(context
        .provenance
        .extraction_warnings
        .iter()
        .any(|warning| warning.contains("does not match any known questionnaire shape")));
}

#[test]
fn unlisted_destination_records_a_metadata_warning() {
    let payload = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "MX",
        "finances": { "bankBalanceUsd": 4000.0 },
        "trip": { "duration": "2_4_weeks" }
    });

    let context = build(&payload);

    // Default profile: 100/day for 25 days plus the flat buffer.
    assert_eq!(context.expert_fields.financial.required_funds_usd, 3000.0);
    assert!(context
        .provenance
        .extraction_warnings
        .iter()
        .any(|warning| warning.contains("no cost metadata for 'MX'")));
}

#[test]
fn missing_duration_is_recorded_as_a_fallback() {
    let payload = json!({
        "version": "2.0",
        "visaType": "tourist",
        "targetCountry": "US",
        "finances": { "bankBalanceUsd": 4000.0 }
    });

    let context = build(&payload);

    assert!(context
        .provenance
        .fallback_fields_used
        .contains(&"stay_duration:default".to_string()));
    // Default bucket is 1-3 months.
    assert_eq!(context.expert_fields.financial.required_funds_usd, 5500.0);
}

#[test]
fn legacy_and_v2_payloads_agree_on_the_assessment() {
    let from_v2 = build(&high_risk_tourist_payload());
    let from_legacy = build(&high_risk_legacy_payload());

    assert_eq!(from_v2.provenance.source_format, SourceFormat::V2);
    assert_eq!(from_legacy.provenance.source_format, SourceFormat::Legacy);
    assert_eq!(from_v2.risk, from_legacy.risk);
}

#[test]
fn provenance_distinguishes_the_three_source_formats() {
    let embedded = json!({ "questionnaireSummary": {
        "visaType": "tourist",
        "targetCountry": "US"
    }});

    assert_eq!(
        build(&high_risk_tourist_payload()).provenance.source_format,
        SourceFormat::V2
    );
    assert_eq!(
        build(&high_risk_legacy_payload()).provenance.source_format,
        SourceFormat::Legacy
    );
    assert_eq!(build(&embedded).provenance.source_format, SourceFormat::Hybrid);
}
