//! Integration tests for the HTTP API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use emolens::core::{create_router, ApiConfig};
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tower::ServiceExt;

fn create_test_router() -> Router {
    create_router(ApiConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn analyze(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["analyses"], 0);
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_categories_in_canonical_order() {
    let app = create_test_router();
    let (status, body) = send(&app, get("/categories")).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["emotion"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["happy", "sad", "angry", "neutral", "anxious"]);
    assert_eq!(json[0]["label"], "Happy");
}

#[tokio::test]
async fn test_analyze_returns_result() {
    let app = create_test_router();
    let (status, body) = send(
        &app,
        analyze(r#"{"eye_state": "tense", "mouth_shape": "frown", "eyebrow_position": "furrowed"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["index"], 0);
    assert_eq!(json["detected_emotion"], "angry");
    assert_eq!(json["confidence"], 50);
    assert_eq!(json["scores"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_analyze_rejects_unknown_values() {
    let app = create_test_router();
    let (status, body) = send(
        &app,
        analyze(r#"{"eye_state": "closed", "mouth_shape": "smile"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["fields"], serde_json::json!(["eye_state", "eyebrow_position"]));
    assert!(json["error"].as_str().unwrap().contains("closed"));

    // rejected input is not recorded
    let (_, body) = send(&app, get("/health")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["analyses"], 0);
}

#[tokio::test]
async fn test_history_flow() {
    let app = create_test_router();

    send(
        &app,
        analyze(r#"{"eye_state": "open", "mouth_shape": "smile", "eyebrow_position": "normal"}"#),
    )
    .await;
    send(
        &app,
        analyze(r#"{"eye_state": "relaxed", "mouth_shape": "neutral", "eyebrow_position": "normal"}"#),
    )
    .await;

    let (status, body) = send(&app, get("/history")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["series"][0]["label"], "#1");
    assert_eq!(json["series"][0]["scores"], serde_json::json!([55, 5, 5, 30, 5]));
    assert_eq!(json["series"][1]["detected_emotion"], "neutral");
    assert_eq!(json["detected_counts"][0]["emotion"], "happy");
    assert_eq!(json["detected_counts"][0]["count"], 1);

    let (status, body) = send(&app, get("/history/1")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detected_emotion"], "neutral");
    assert_eq!(json["confidence"], 62);

    let (status, body) = send(&app, get("/history/0/report")).await;
    assert_eq!(status, StatusCode::OK);
    let report = String::from_utf8(body).unwrap();
    assert!(report.contains("Detected Emotion: HAPPY"));
    assert!(report.contains("Confidence: 55%"));
}

#[tokio::test]
async fn test_history_entry_not_found() {
    let app = create_test_router();

    let (status, _) = send(&app, get("/history/3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/history/3/report")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_analyze_reports_wrong_json_types() {
    let app = create_test_router();
    let (status, body) = send(
        &app,
        analyze(r#"{"eye_state": 3, "mouth_shape": "smile", "eyebrow_position": "normal"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["fields"], serde_json::json!(["eye_state"]));

    let (status, body) = send(
        &app,
        analyze(r#"{"eye_state": "open", "mouth_shape": ["smile"], "eyebrow_position": true}"#),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["fields"], serde_json::json!(["mouth_shape", "eyebrow_position"]));
}

#[tokio::test]
async fn test_analyze_unreadable_body_returns_json_error() {
    let app = create_test_router();
    let (status, body) = send(&app, analyze(r#"{"eye_state": "open","#)).await;

    assert!(status.is_client_error());
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("malformed request body"));
}

#[tokio::test(start_paused = true)]
async fn test_analysis_delay_applied_before_recording() {
    let app = create_router(ApiConfig { analysis_delay_ms: 1200 });
    let start = Instant::now();

    let pending = {
        let app = app.clone();
        tokio::spawn(async move {
            send(
                &app,
                analyze(r#"{"eye_state": "open", "mouth_shape": "smile", "eyebrow_position": "normal"}"#),
            )
            .await
        })
    };

    // halfway through the delay nothing is recorded yet
    tokio::time::sleep(Duration::from_millis(600)).await;
    let (_, body) = send(&app, get("/health")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["analyses"], 0);
    assert!(!pending.is_finished());

    let (status, body) = pending.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(1200));
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detected_emotion"], "happy");

    let (_, body) = send(&app, get("/health")).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["analyses"], 1);
}
