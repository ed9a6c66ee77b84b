//! Search service - turns request parameters into one store query
//!
//! Validates the request, builds the predicate (simple or advanced), resolves
//! the ordering and runs a single paged search against the store.

use corpsearch_query::{
    combine, compile_clause, resolve_sort, Clause, Field, Mode, Operator, Predicate, QueryError,
    SearchTarget,
};
use std::sync::Arc;

use crate::{
    db::{search::SearchQuery, SearchStore},
    metrics::{SEARCH_CLAUSES, SEARCH_RESULTS, SEARCH_TOTAL},
    models::{CorporationSummary, PartySummary, ResultPage},
    Result,
};

/// Raw search parameters, exactly as they appear on the query string.
///
/// `field`, `operator` and `value` are repeatable and kept in order;
/// every other parameter takes its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub fields: Vec<String>,
    pub operators: Vec<String>,
    pub values: Vec<String>,
    pub mode: Option<String>,
    pub sort_type: Option<String>,
    pub sort_value: Option<String>,
    pub page: Option<String>,
}

impl SearchRequest {
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut request = Self::default();
        let Some(raw) = raw else {
            return request;
        };

        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "field" => request.fields.push(value),
                "operator" => request.operators.push(value),
                "value" => request.values.push(value),
                "query" => {
                    request.query.get_or_insert(value);
                }
                "mode" => {
                    request.mode.get_or_insert(value);
                }
                "sort_type" => {
                    request.sort_type.get_or_insert(value);
                }
                "sort_value" => {
                    request.sort_value.get_or_insert(value);
                }
                "page" => {
                    request.page.get_or_insert(value);
                }
                _ => {}
            }
        }
        request
    }

    /// Free-text query, if present and not blank.
    fn simple_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    fn has_clauses(&self) -> bool {
        !(self.fields.is_empty() && self.operators.is_empty() && self.values.is_empty())
    }

    fn clauses(&self) -> Vec<Clause> {
        self.fields
            .iter()
            .zip(&self.operators)
            .zip(&self.values)
            .map(|((field, operator), value)| Clause::new(field, operator, value))
            .collect()
    }
}

/// Corporation quick search: number, current name, or any party's name.
pub fn simple_corporation_predicate(query: &str) -> Predicate {
    Predicate::compare(Field::CorpNum, Operator::Exact, query)
        .or(Predicate::compare(Field::CorpName, Operator::Contains, query))
        .or(Predicate::compare(Field::FirstName, Operator::Contains, query))
        .or(Predicate::compare(Field::LastName, Operator::Contains, query))
}

/// Party quick search: corporation number or the party's own name.
pub fn simple_party_predicate(query: &str) -> Predicate {
    Predicate::compare(Field::CorpNum, Operator::Exact, query)
        .or(Predicate::compare(Field::FirstName, Operator::Contains, query))
        .or(Predicate::compare(Field::LastName, Operator::Contains, query))
}

/// 1-based page number; absent means the first page.
pub fn parse_page(raw: Option<&str>) -> std::result::Result<u32, QueryError> {
    let Some(raw) = raw else {
        return Ok(1);
    };
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(QueryError::MalformedClause(format!(
            "page must be a positive integer, got {raw:?}"
        ))),
    }
}

/// How a search was composed, for logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    Simple,
    Advanced(Mode),
}

impl Composition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Advanced(mode) => mode.as_str(),
        }
    }
}

pub struct SearchService {
    store: Arc<dyn SearchStore>,
    page_size: u32,
}

impl SearchService {
    pub fn new(store: Arc<dyn SearchStore>, page_size: u32) -> Self {
        Self { store, page_size }
    }

    /// Validate and compile a corporation search. Only `query`, `page`,
    /// `sort_type` and `sort_value` are read.
    pub fn plan_corporations(
        &self,
        request: &SearchRequest,
    ) -> std::result::Result<(SearchQuery, Composition), QueryError> {
        let query = request.simple_query().ok_or_else(|| {
            QueryError::MissingQuery("corporation search requires a non-empty query".to_string())
        })?;
        let page = parse_page(request.page.as_deref())?;
        let target = SearchTarget::Corporations;
        let order = resolve_sort(
            target,
            request.sort_value.as_deref(),
            request.sort_type.as_deref(),
        )?;

        Ok((
            SearchQuery {
                target,
                predicate: simple_corporation_predicate(query),
                order,
                page,
                page_size: self.page_size,
            },
            Composition::Simple,
        ))
    }

    /// Validate and compile a party search, simple or advanced.
    pub fn plan_parties(
        &self,
        request: &SearchRequest,
    ) -> std::result::Result<(SearchQuery, Composition), QueryError> {
        let simple = request.simple_query();

        if simple.is_some() && !request.fields.is_empty() {
            return Err(QueryError::MalformedClause(
                "use simple query or advanced. don't mix".to_string(),
            ));
        }
        let (fields, operators, values) = (
            request.fields.len(),
            request.operators.len(),
            request.values.len(),
        );
        if request.has_clauses() && (fields != operators || operators != values) {
            return Err(QueryError::MalformedClause(format!(
                "mismatched query param lengths: fields:{fields} operators:{operators} values:{values}"
            )));
        }
        if simple.is_none() && fields == 0 {
            return Err(QueryError::MissingQuery(
                "provide either query or field/operator/value".to_string(),
            ));
        }
        let page = parse_page(request.page.as_deref())?;

        let (predicate, composition) = match simple {
            Some(query) => (simple_party_predicate(query), Composition::Simple),
            None => {
                let mode = Mode::from_token(request.mode.as_deref());
                let predicates = request
                    .clauses()
                    .iter()
                    .map(compile_clause)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                let predicate = combine(predicates, mode).ok_or_else(|| {
                    QueryError::MissingQuery("no search clauses".to_string())
                })?;
                (predicate, Composition::Advanced(mode))
            }
        };

        let target = SearchTarget::Parties;
        let order = resolve_sort(
            target,
            request.sort_value.as_deref(),
            request.sort_type.as_deref(),
        )?;

        Ok((
            SearchQuery {
                target,
                predicate,
                order,
                page,
                page_size: self.page_size,
            },
            composition,
        ))
    }

    pub async fn search_corporations(
        &self,
        request: &SearchRequest,
    ) -> Result<ResultPage<CorporationSummary>> {
        let target = SearchTarget::Corporations;
        let (query, composition) = self
            .plan_corporations(request)
            .inspect_err(|e| record_rejected(target, e))?;
        log_plan(&query, composition);

        let page = self.store.search_corporations(&query).await;
        record_outcome(&query, composition, page.as_ref().map(|p| p.total));
        page
    }

    pub async fn search_parties(&self, request: &SearchRequest) -> Result<ResultPage<PartySummary>> {
        let target = SearchTarget::Parties;
        let (query, composition) = self
            .plan_parties(request)
            .inspect_err(|e| record_rejected(target, e))?;
        log_plan(&query, composition);

        let page = self.store.search_parties(&query).await;
        record_outcome(&query, composition, page.as_ref().map(|p| p.total));
        page
    }
}

fn log_plan(query: &SearchQuery, composition: Composition) {
    let clauses = query.predicate.comparisons().len();
    let sort = query
        .order
        .iter()
        .map(|k| format!("{} {}", k.field, k.direction.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    tracing::debug!(
        target_kind = query.target.as_str(),
        mode = composition.as_str(),
        clauses,
        sort = %sort,
        page = query.page,
        "Executing search"
    );
    SEARCH_CLAUSES
        .with_label_values(&[query.target.as_str()])
        .observe(clauses as f64);
}

fn record_rejected(target: SearchTarget, error: &QueryError) {
    tracing::debug!(target_kind = target.as_str(), kind = error.kind(), %error, "Search rejected");
    SEARCH_TOTAL
        .with_label_values(&[target.as_str(), "none", error.kind()])
        .inc();
}

fn record_outcome(
    query: &SearchQuery,
    composition: Composition,
    total: std::result::Result<i64, &crate::Error>,
) {
    let target = query.target.as_str();
    let outcome = match total {
        Ok(total) => {
            SEARCH_RESULTS
                .with_label_values(&[target])
                .observe(total as f64);
            "ok"
        }
        Err(_) => "error",
    };
    SEARCH_TOTAL
        .with_label_values(&[target, composition.as_str(), outcome])
        .inc();
}
