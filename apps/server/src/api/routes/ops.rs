use crate::api::handlers::ops;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Liveness and readiness checks
pub fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/ops/healthz", get(ops::healthz))
        .route("/ops/readyz", get(ops::readyz))
}
