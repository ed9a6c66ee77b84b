//! Metrics endpoint handler

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::metrics::{DB_CONNECTIONS_ACTIVE, DB_CONNECTIONS_IDLE};
use crate::state::AppState;

/// Prometheus text exposition of every registered metric.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    if let Some(pool) = state.store.pool_status() {
        let idle = i64::try_from(pool.idle).unwrap_or(i64::MAX);
        DB_CONNECTIONS_IDLE.set(idle);
        DB_CONNECTIONS_ACTIVE.set(i64::from(pool.size) - idle);
    }

    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}
