//! Relay HTTP API
//!
//! Two operations plus a health probe.

use axum::{
    extract::{
        rejection::{JsonRejection, StringRejection},
        State,
    },
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::types::{HealthResponse, LeaderboardInfoRequest, MessageResponse};
use super::AppState;
use crate::credentials::{parse_header_blob, CredentialStore};
use crate::error::{RelayError, RelayResult};
use crate::leaderboard::{fetch_summary, LeaderboardSummary};

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/set-headers", post(set_headers))
        // Path used by existing clients
        .route("/setHeaders", post(set_headers))
        .route("/leaderboard-info", post(leaderboard_info))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

// ─────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────

/// POST /set-headers - plain text `Name: Value` lines
async fn set_headers(
    State(state): State<AppState>,
    body: Result<String, StringRejection>,
) -> RelayResult<Json<MessageResponse>> {
    let body = body
        .map_err(|e| RelayError::InvalidInput(format!("Invalid request body: {}", e.body_text())))?;

    let credentials = parse_header_blob(&body)?;
    state.store.set(&credentials).await?;
    Ok(Json(MessageResponse::new("Headers saved successfully")))
}

/// POST /leaderboard-info - `{"url": "<profile url>"}`
async fn leaderboard_info(
    State(state): State<AppState>,
    payload: Result<Json<LeaderboardInfoRequest>, JsonRejection>,
) -> RelayResult<Json<LeaderboardSummary>> {
    let Json(request) = payload
        .map_err(|e| RelayError::InvalidInput(format!("Invalid request body: {}", e.body_text())))?;

    let url = request
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| RelayError::InvalidInput("URL is required".to_string()))?;

    let summary = fetch_summary(state.api.as_ref(), state.store.as_ref(), url.trim()).await?;
    Ok(Json(summary))
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
