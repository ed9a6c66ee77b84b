//! Liveness and readiness checks

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// Healthy when the store answers a trivial query.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "message": "api is healthy" }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "api is down" })),
            )
        }
    }
}

pub async fn readyz() -> impl IntoResponse {
    Json(json!({ "message": "api is ready" }))
}
