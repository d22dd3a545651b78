// src/api.rs
//! HTTP surface: router, shared state and request handlers.
//!
//! Handlers are thin: field validation, timeout enforcement, and mapping
//! `AnalyzeError` to a status code + `{"error": ...}` body. All analysis
//! logic lives in the detector pipeline.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::detector::{AnalysisResult, Detector};
use crate::error::AnalyzeError;
use crate::source::ContentSource;

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
    pub url_source: Arc<dyn ContentSource>,
    pub request_timeout: Duration,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze/text", post(analyze_text))
        .route("/analyze/url", post(analyze_url))
        .route("/analyze", post(analyze))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalyzeError::EmptyContent
            | AnalyzeError::InvalidInput(_)
            | AnalyzeError::SourceResolution(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AnalyzeError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AnalyzeError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct HealthResp {
    status: &'static str,
    model_loaded: bool,
    tokenizer_loaded: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResp> {
    // Startup refuses to serve without both artifacts, so a live detector
    // implies both flags.
    let loaded = !state.detector.scorer_name().is_empty();
    Json(HealthResp {
        status: "healthy",
        model_loaded: loaded,
        tokenizer_loaded: loaded,
    })
}

#[derive(Deserialize)]
struct AnalyzeBody {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

async fn analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    let text = body
        .text
        .ok_or_else(|| AnalyzeError::invalid("Text content is required"))?;
    let result = state.detector.analyze_text(&text)?;
    Ok(Json(result))
}

async fn analyze_url(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    let url = body
        .url
        .ok_or_else(|| AnalyzeError::invalid("URL is required"))?;
    run_url_analysis(&state, &url).await.map(Json)
}

/// Universal endpoint: dispatch on whichever field is present (url wins).
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    match (&body.url, &body.text) {
        (Some(url), _) if !url.trim().is_empty() => run_url_analysis(&state, url).await.map(Json),
        (_, Some(text)) if !text.trim().is_empty() => Ok(Json(state.detector.analyze_text(text)?)),
        _ => Err(AnalyzeError::invalid("Either 'url' or 'text' is required")),
    }
}

/// Resolve and analyze under one bounded timeout: the content fetch is the
/// only await point, and the scoring that follows shares its budget. The
/// text-only path is not wrapped: the scorer is a synchronous in-process
/// pure function with no await points, so a tokio timeout cannot bound it.
async fn run_url_analysis(state: &AppState, url: &str) -> Result<AnalysisResult, AnalyzeError> {
    if url.trim().is_empty() {
        return Err(AnalyzeError::invalid("URL cannot be empty"));
    }
    tokio::time::timeout(state.request_timeout, async {
        let content = state.url_source.resolve(url).await?;
        state.detector.analyze_resolved(&content, url)
    })
    .await
    .map_err(|_| AnalyzeError::Timeout)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_map_to_their_documented_status_codes() {
        let cases = [
            (AnalyzeError::EmptyContent, StatusCode::BAD_REQUEST),
            (
                AnalyzeError::invalid("Text content is required"),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalyzeError::source("Not a valid Twitter URL"),
                StatusCode::BAD_REQUEST,
            ),
            (AnalyzeError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (
                AnalyzeError::ModelUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AnalyzeError::Unexpected("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let resp = err.clone().into_response();
            assert_eq!(resp.status(), expected, "wrong status for {err:?}");
        }
    }
}
