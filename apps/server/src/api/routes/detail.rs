use crate::api::handlers::detail;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn detail_routes() -> Router<AppState> {
    Router::new()
        .route("/corporation/:corp_num", get(detail::get_corporation))
        .route("/person/officesheld/:id", get(detail::get_offices_held))
        .route("/person/:id", get(detail::get_party))
        .route("/person/:id/sameaddress", get(detail::get_same_address))
        .route("/person/:id/samename", get(detail::get_same_name))
        .route("/person/:id/filings", get(detail::get_filings))
}
