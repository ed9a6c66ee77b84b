pub mod builders;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use corpsearch::{
    api::create_router,
    db::{Fixtures, MemoryStore, SearchStore},
    AppState, Config,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

pub use builders::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn new(fixtures: Fixtures) -> Self {
        Self::with_store(Arc::new(MemoryStore::new(fixtures)))
    }

    pub fn with_store(store: Arc<dyn SearchStore>) -> Self {
        let state = AppState::with_store(Config::default(), store);
        let router = create_router(state.clone());
        Self { router, state }
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .body(Body::empty())
            .context("build request")?;

        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// GET a JSON endpoint.
    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _headers, body) = self.request(Method::GET, path_and_query, &[]).await?;
        let json = serde_json::from_slice(&body)
            .with_context(|| format!("parse JSON body of {path_and_query}"))?;
        Ok((status, json))
    }
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "unexpected status for {context}");
}

/// Assert an error body of the given kind and return its message.
pub fn assert_error_kind<'a>(body: &'a Value, kind: &str) -> &'a str {
    assert_eq!(body["error"]["kind"], kind, "error body: {body}");
    body["error"]["message"].as_str().unwrap_or_default()
}

/// Values of `key` across the `results` array, as strings.
pub fn result_values(body: &Value, key: &str) -> Vec<String> {
    body["results"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .map(|row| match &row[key] {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}
