use super::handlers;
use super::state::AppState;
use super::ws;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Inbound call audio, one route per leg
        .route("/ws/caller", get(ws::caller_leg))
        .route("/ws/receiver", get(ws::receiver_leg))
        // Observers asking to be notified about call updates
        .route("/ws/updates", get(ws::updates))
        // Calls, transcripts, and analyses
        .route("/api/calls", get(handlers::get_calls))
        .route(
            "/api/calls/:timestamp/transcript",
            get(handlers::get_call_transcript),
        )
        .route(
            "/api/calls/:timestamp/analysis/:who",
            get(handlers::get_call_analysis),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
