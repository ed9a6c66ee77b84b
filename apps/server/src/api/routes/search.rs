use crate::api::handlers::search;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Search endpoints, with and without the trailing slash.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/corporation/search/", get(search::search_corporations))
        .route("/corporation/search", get(search::search_corporations))
        .route("/person/search/", get(search::search_parties))
        .route("/person/search", get(search::search_parties))
}
