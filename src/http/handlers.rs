use super::state::AppState;
use crate::sentiment::EmotionRecord;
use crate::store::{CallId, Party};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::error;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CallsResponse {
    pub calls: Vec<CallSummary>,
}

#[derive(Debug, Serialize)]
pub struct CallSummary {
    pub timestamp: CallId,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub emotion: EmotionRecord,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/calls
/// List the start timestamps of every call processed so far
pub async fn get_calls(State(state): State<AppState>) -> impl IntoResponse {
    let calls = state
        .store
        .call_ids()
        .await
        .into_iter()
        .map(|timestamp| CallSummary { timestamp })
        .collect();

    Json(CallsResponse { calls })
}

/// GET /api/calls/:timestamp/transcript
/// Full record for a single call: finalized history plus both live slots
pub async fn get_call_transcript(
    State(state): State<AppState>,
    Path(timestamp): Path<CallId>,
) -> impl IntoResponse {
    Json(state.store.get_transcript(timestamp).await)
}

/// GET /api/calls/:timestamp/analysis/:who
/// Emotion analysis of one speaker in a call
pub async fn get_call_analysis(
    State(state): State<AppState>,
    Path((timestamp, who)): Path<(CallId, Party)>,
) -> impl IntoResponse {
    match state.sentiment.analyze(timestamp, who).await {
        Ok(emotion) => {
            // tell the browser not to ask again before the cached analysis
            // could possibly change
            let max_age = state.sentiment.cache_time().as_secs();
            (
                StatusCode::OK,
                [(header::CACHE_CONTROL, format!("max-age={}", max_age))],
                Json(AnalysisResponse { emotion }),
            )
                .into_response()
        }
        Err(e) => {
            error!("analysis failed for call {} ({}): {:#}", timestamp, who, e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Analysis failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
