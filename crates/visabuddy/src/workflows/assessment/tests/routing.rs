use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::assessment::router::assessment_router;
use crate::workflows::assessment::service::AssessmentService;

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn get_assessment_returns_context_for_stored_application() {
    let (service, store) = build_service();
    store.seed(applicant_record(
        "app-000001",
        Some(strong_profile_payload()),
    ));

    let router = assessment_router(Arc::new(service));
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/app-000001")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload
            .pointer("/risk/level")
            .and_then(Value::as_str),
        Some("low")
    );
    assert_eq!(
        payload
            .pointer("/provenance/source_format")
            .and_then(Value::as_str),
        Some("v2")
    );
}

#[tokio::test]
async fn get_assessment_returns_not_found_for_unknown_application() {
    let (service, _store) = build_service();

    let router = assessment_router(Arc::new(service));
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/app-missing")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("not found"));
}

#[tokio::test]
async fn store_outage_maps_to_service_unavailable() {
    let service = AssessmentService::new(Arc::new(UnavailableStore), Arc::new(catalog()));

    let router = assessment_router(Arc::new(service));
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/assessments/app-000001")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn preview_builds_context_from_inline_payload() {
    let (service, _store) = build_service();

    let request_body = json!({
        "country": "US",
        "app_language": "en",
        "today": "2026-08-01",
        "questionnaire": high_risk_tourist_payload()
    });

    let router = assessment_router(Arc::new(service));
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/preview")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&request_body).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/risk/level").and_then(Value::as_str),
        Some("high")
    );
    assert_eq!(
        payload
            .pointer("/risk/approval_probability_percent")
            .and_then(Value::as_u64),
        Some(5)
    );
}

#[tokio::test]
async fn preview_without_questionnaire_returns_the_baseline() {
    let (service, _store) = build_service();

    let request_body = json!({ "country": "FR" });

    let router = assessment_router(Arc::new(service));
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments/preview")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&request_body).expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.pointer("/risk/score").and_then(Value::as_u64),
        Some(50)
    );
    assert_eq!(
        payload
            .pointer("/provenance/source_format")
            .and_then(Value::as_str),
        Some("unknown")
    );
}
