//! HTTP API for EmoLens
//!
//! Endpoints:
//! - GET /health - Health check
//! - GET /categories - Category labels and emoji
//! - POST /analyze - Classify a feature snapshot, append to history
//! - GET /history - History summary and chart series
//! - GET /history/{index} - One stored result
//! - GET /history/{index}/report - Text report for one stored result

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::core::{format_report, EmotionClassifier, EmotionHistory, HistoryPoint};
use crate::types::{ClassificationResult, EmotionCategory, FeatureField, RawFeatureSnapshot, ValidationError};

/// Server settings
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// Pause before each analysis, in milliseconds (0 = none)
    pub analysis_delay_ms: u64,
}

/// App state
pub struct AppState {
    pub history: RwLock<EmotionHistory>,
    pub classifier: EmotionClassifier,
    pub config: ApiConfig,
}

/// Errors returned by handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no analysis at index {0}")]
    NotFound(usize),
    #[error("malformed request body: {}", .0.body_text())]
    MalformedBody(#[from] JsonRejection),
}

/// Error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FeatureField>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, fields) = match &self {
            ApiError::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.fields()),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, Vec::new()),
            ApiError::MalformedBody(rejection) => (rejection.status(), Vec::new()),
        };
        let body = ErrorResponse {
            error: self.to_string(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub analyses: usize,
}

/// One category's presentation metadata
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub emotion: EmotionCategory,
    pub label: String,
    pub emoji: String,
}

/// Analyze response: the result plus its history index
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub index: usize,
    #[serde(flatten)]
    pub result: ClassificationResult,
}

/// Detection count for one category
#[derive(Debug, Serialize)]
pub struct DetectedCount {
    pub emotion: EmotionCategory,
    pub count: usize,
}

/// History summary response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub count: usize,
    pub detected_counts: Vec<DetectedCount>,
    pub series: Vec<HistoryPoint>,
}

/// Create the API router
pub fn create_router(config: ApiConfig) -> Router {
    let state = Arc::new(AppState {
        history: RwLock::new(EmotionHistory::new()),
        classifier: EmotionClassifier::new(),
        config,
    });

    Router::new()
        .route("/health", get(health))
        .route("/categories", get(categories))
        .route("/analyze", post(analyze))
        .route("/history", get(history))
        .route("/history/:index", get(history_entry))
        .route("/history/:index/report", get(history_report))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let history = state.history.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        analyses: history.len(),
    })
}

/// Category metadata, canonical order
async fn categories() -> Json<Vec<CategoryInfo>> {
    Json(
        EmotionCategory::ALL
            .iter()
            .map(|c| CategoryInfo {
                emotion: *c,
                label: c.label().to_string(),
                emoji: c.emoji().to_string(),
            })
            .collect(),
    )
}

/// Classify a snapshot and record it
async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawFeatureSnapshot>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(raw) = payload.map_err(|e| {
        warn!(error = %e.body_text(), "unreadable analysis request");
        ApiError::from(e)
    })?;
    let snapshot = raw.validate().map_err(|e| {
        warn!(error = %e, "rejected analysis request");
        e
    })?;

    if state.config.analysis_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.analysis_delay_ms)).await;
    }

    let result = state.classifier.classify(snapshot);

    let mut history = state.history.write().await;
    let index = history.record(result.clone());
    info!(
        index,
        detected = %result.detected_emotion,
        confidence = result.confidence,
        "analysis recorded"
    );

    Ok(Json(AnalyzeResponse { index, result }))
}

/// History summary
async fn history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let history = state.history.read().await;
    let counts = history.detected_counts();

    Json(HistoryResponse {
        count: history.len(),
        detected_counts: EmotionCategory::ALL
            .iter()
            .map(|c| DetectedCount {
                emotion: *c,
                count: counts[c.index()],
            })
            .collect(),
        series: history.series(),
    })
}

/// One stored result
async fn history_entry(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let history = state.history.read().await;
    let result = history.get(index).ok_or(ApiError::NotFound(index))?;
    Ok(Json(result.clone()))
}

/// Text report for one stored result
async fn history_report(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.history.read().await;
    let result = history.get(index).ok_or(ApiError::NotFound(index))?;
    let report = format_report(result);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        report,
    ))
}

/// Run the API server
pub async fn run_server(addr: &str, config: ApiConfig) -> std::io::Result<()> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "EmoLens API listening");
    println!("EmoLens API running on {}", addr);
    println!("  GET  /health                - Health check");
    println!("  GET  /categories            - Category labels");
    println!("  POST /analyze               - Classify features");
    println!("  GET  /history               - History summary");
    println!("  GET  /history/:index        - Stored result");
    println!("  GET  /history/:index/report - Text report");
    axum::serve(listener, router).await
}
