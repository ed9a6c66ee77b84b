//! Search handlers
//!
//! - GET /corporation/search/?query=&page=&sort_type=&sort_value=
//! - GET /person/search/?query=  or  ?field=&operator=&value=[...]&mode=ALL

use axum::{
    extract::{RawQuery, State},
    Json,
};

use crate::{
    models::{CorporationSummary, PartySummary, ResultPage},
    services::SearchRequest,
    state::AppState,
    Result,
};

pub async fn search_corporations(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ResultPage<CorporationSummary>>> {
    let request = SearchRequest::from_query(raw.as_deref());
    let page = state.search.search_corporations(&request).await?;
    Ok(Json(page))
}

pub async fn search_parties(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ResultPage<PartySummary>>> {
    let request = SearchRequest::from_query(raw.as_deref());
    let page = state.search.search_parties(&request).await?;
    Ok(Json(page))
}
