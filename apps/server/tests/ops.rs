#[allow(unused)]
mod support;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use corpsearch::{
    db::{Fixtures, SearchQuery, SearchStore},
    models::{
        Address, CorpName, CorpParty, Corporation, CorporationSummary, FilingView, Office,
        OfficeHeld, PartySummary, RelatedParty, ResultPage, StateView,
    },
    Error, Result,
};
use std::sync::Arc;
use support::*;

/// Store whose backing database is unreachable.
struct DownStore;

fn down<T>() -> Result<T> {
    Err(Error::Internal("database unreachable".to_string()))
}

#[async_trait]
impl SearchStore for DownStore {
    async fn search_corporations(&self, _: &SearchQuery) -> Result<ResultPage<CorporationSummary>> {
        down()
    }
    async fn search_parties(&self, _: &SearchQuery) -> Result<ResultPage<PartySummary>> {
        down()
    }
    async fn corporation(&self, _: &str) -> Result<Option<Corporation>> {
        down()
    }
    async fn corp_names(&self, _: &str) -> Result<Vec<CorpName>> {
        down()
    }
    async fn corp_state(&self, _: &str) -> Result<Option<StateView>> {
        down()
    }
    async fn offices(&self, _: &str) -> Result<Vec<Office>> {
        down()
    }
    async fn address(&self, _: i32) -> Result<Option<Address>> {
        down()
    }
    async fn corp_party(&self, _: i32) -> Result<Option<CorpParty>> {
        down()
    }
    async fn offices_held(&self, _: i32) -> Result<Vec<OfficeHeld>> {
        down()
    }
    async fn parties_at_addresses(
        &self,
        _: Option<i32>,
        _: Option<i32>,
    ) -> Result<Vec<RelatedParty>> {
        down()
    }
    async fn parties_with_name(
        &self,
        _: Option<&str>,
        _: Option<&str>,
        _: Option<&str>,
    ) -> Result<Vec<RelatedParty>> {
        down()
    }
    async fn party_filings(&self, _: i32) -> Result<Vec<FilingView>> {
        down()
    }
    async fn ping(&self) -> Result<()> {
        down()
    }
}

#[tokio::test]
async fn health_and_readiness_report_ok() -> anyhow::Result<()> {
    let app = TestApp::new(Fixtures::default());

    let (status, body) = app.get_json("/ops/healthz").await?;
    assert_status(status, StatusCode::OK, "healthz");
    assert_eq!(body["message"], "api is healthy");

    let (status, body) = app.get_json("/ops/readyz").await?;
    assert_status(status, StatusCode::OK, "readyz");
    assert_eq!(body["message"], "api is ready");
    Ok(())
}

#[tokio::test]
async fn unreachable_store_is_reported_down() -> anyhow::Result<()> {
    let app = TestApp::with_store(Arc::new(DownStore));

    let (status, body) = app.get_json("/ops/healthz").await?;
    assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "healthz down");
    assert_eq!(body["message"], "api is down");

    // Search failures surface as a generic internal error.
    let (status, body) = app.get_json("/person/search/?query=sky").await?;
    assert_status(status, StatusCode::INTERNAL_SERVER_ERROR, "search down");
    assert_eq!(assert_error_kind(&body, "internal"), "Internal server error");
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_ids_and_security_headers() -> anyhow::Result<()> {
    let app = TestApp::new(Fixtures::default());

    let (status, headers, _) = app
        .request(Method::GET, "/ops/readyz", &[("x-request-id", "client-123")])
        .await?;
    assert_status(status, StatusCode::OK, "readyz");
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(!request_id.is_empty());
    assert_ne!(request_id, "client-123");
    assert_eq!(
        headers.get("x-correlation-id").and_then(|v| v.to_str().ok()),
        Some("client-123")
    );
    assert_eq!(
        headers.get("x-content-type-options").and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    Ok(())
}

#[tokio::test]
async fn root_and_metrics_are_served() -> anyhow::Result<()> {
    let app = TestApp::new(registry());

    let (status, body) = app.get_json("/").await?;
    assert_status(status, StatusCode::OK, "root");
    assert_eq!(body["service"], "corpsearch");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    app.get_json("/person/search/?query=sky").await?;

    let (status, _, body) = app.request(Method::GET, "/metrics", &[]).await?;
    assert_status(status, StatusCode::OK, "metrics");
    let text = String::from_utf8(body.to_vec())?;
    assert!(text.contains("corpsearch_http_requests_total"));
    assert!(text.contains("corpsearch_search_total"));
    Ok(())
}

#[tokio::test]
async fn bundled_fixture_file_serves_searches() -> anyhow::Result<()> {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/registry.json");
    let store = corpsearch::db::MemoryStore::from_json_file(&path)?;
    let app = TestApp::with_store(Arc::new(store));

    let (status, body) = app
        .get_json("/person/search/?field=any_name&operator=startswith&value=sky")
        .await?;
    assert_status(status, StatusCode::OK, "fixture search");
    assert_eq!(result_values(&body, "corp_party_id"), vec!["4", "1", "2"]);

    let (_, body) = app.get_json("/corporation/search/?query=harbour").await?;
    assert_eq!(body["results"][0]["state_typ_cd"], "D1A");
    assert_eq!(body["results"][0]["addr"], "88 Harbour Rd");

    let (_, body) = app.get_json("/person/1/filings").await?;
    assert_eq!(body["results"][0]["full_desc"], "Notice of Change of Directors");
    Ok(())
}
