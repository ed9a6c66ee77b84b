//! Lookup handlers for a single corporation or party

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use crate::{
    models::{CorporationDetail, PartyDetail},
    state::AppState,
    Error, Result,
};

fn parse_party_id(raw: &str) -> Result<i32> {
    raw.parse()
        .map_err(|_| Error::BadRequest(format!("person id must be an integer, got {raw:?}")))
}

pub async fn get_corporation(
    State(state): State<AppState>,
    Path(corp_num): Path<String>,
) -> Result<Json<CorporationDetail>> {
    Ok(Json(state.detail.corporation(&corp_num).await?))
}

pub async fn get_party(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PartyDetail>> {
    let id = parse_party_id(&id)?;
    Ok(Json(state.detail.party(id).await?))
}

pub async fn get_offices_held(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_party_id(&id)?;
    let results = state.detail.offices_held(id).await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn get_same_address(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_party_id(&id)?;
    let results = state.detail.same_address(id).await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn get_same_name(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_party_id(&id)?;
    let results = state.detail.same_name(id).await?;
    Ok(Json(json!({ "results": results })))
}

pub async fn get_filings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let id = parse_party_id(&id)?;
    let results = state.detail.filings(id).await?;
    Ok(Json(json!({ "results": results })))
}
