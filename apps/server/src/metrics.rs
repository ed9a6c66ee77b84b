//! Prometheus metrics for the search service.

use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, register_int_gauge_vec,
    HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
};

lazy_static! {
    // HTTP Request Metrics

    /// Total HTTP requests by method, path, and status
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "corpsearch_http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .expect("Failed to register HTTP_REQUESTS_TOTAL");

    /// HTTP request duration in seconds
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "corpsearch_http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");

    pub static ref HTTP_REQUESTS_IN_FLIGHT: IntGaugeVec = register_int_gauge_vec!(
        "corpsearch_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
        &["method", "path"]
    )
    .expect("Failed to register HTTP_REQUESTS_IN_FLIGHT");

    pub static ref HTTP_RESPONSE_SIZE_BYTES: HistogramVec = register_histogram_vec!(
        "corpsearch_http_response_size_bytes",
        "HTTP response size in bytes",
        &["method", "path", "status"],
        vec![100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]
    )
    .expect("Failed to register HTTP_RESPONSE_SIZE_BYTES");

    // Search Metrics

    /// Searches by target, combination mode and outcome
    pub static ref SEARCH_TOTAL: IntCounterVec = register_int_counter_vec!(
        "corpsearch_search_total",
        "Total number of registry searches",
        &["target", "mode", "outcome"]
    )
    .expect("Failed to register SEARCH_TOTAL");

    /// Rows matched per search (the total, not the page)
    pub static ref SEARCH_RESULTS: HistogramVec = register_histogram_vec!(
        "corpsearch_search_results",
        "Number of rows matching a search",
        &["target"],
        vec![0.0, 1.0, 10.0, 20.0, 100.0, 1000.0, 10000.0, 100000.0]
    )
    .expect("Failed to register SEARCH_RESULTS");

    /// Leaf comparisons per compiled predicate
    pub static ref SEARCH_CLAUSES: HistogramVec = register_histogram_vec!(
        "corpsearch_search_clauses",
        "Number of comparisons in a search predicate",
        &["target"],
        vec![1.0, 2.0, 3.0, 5.0, 10.0, 20.0, 50.0]
    )
    .expect("Failed to register SEARCH_CLAUSES");

    // Database Metrics

    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "corpsearch_db_query_duration_seconds",
        "Database query duration in seconds",
        &["query_type"],
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]
    )
    .expect("Failed to register DB_QUERY_DURATION_SECONDS");

    pub static ref DB_QUERY_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "corpsearch_db_query_errors_total",
        "Total number of database query errors",
        &["query_type", "error_type"]
    )
    .expect("Failed to register DB_QUERY_ERRORS_TOTAL");

    pub static ref DB_CONNECTIONS_ACTIVE: IntGauge = register_int_gauge!(
        "corpsearch_db_connections_active",
        "Number of active database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_ACTIVE");

    pub static ref DB_CONNECTIONS_IDLE: IntGauge = register_int_gauge!(
        "corpsearch_db_connections_idle",
        "Number of idle database connections"
    )
    .expect("Failed to register DB_CONNECTIONS_IDLE");
}

/// Collapse identifiers in a request path so labels stay low-cardinality.
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => "/".to_string(),
        [entity @ ("person" | "corporation"), "search"] => format!("/{entity}/search/"),
        ["person", "officesheld", _] => "/person/officesheld/{id}".to_string(),
        ["corporation", _] => "/corporation/{corp_num}".to_string(),
        ["person", _] => "/person/{id}".to_string(),
        ["person", _, view @ ("sameaddress" | "samename" | "filings")] => {
            format!("/person/{{id}}/{view}")
        }
        ["ops", check @ ("healthz" | "readyz")] => format!("/ops/{check}"),
        ["metrics"] => "/metrics".to_string(),
        _ => "/other".to_string(),
    }
}

/// Search target named by a search path, if it is one.
pub fn extract_search_target(path: &str) -> Option<&'static str> {
    match path.trim_end_matches('/') {
        "/corporation/search" => Some("corporation"),
        "/person/search" => Some("person"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/"), "/");
        assert_eq!(sanitize_path("/person/search/"), "/person/search/");
        assert_eq!(sanitize_path("/person/search"), "/person/search/");
        assert_eq!(sanitize_path("/corporation/BC0460007"), "/corporation/{corp_num}");
        assert_eq!(sanitize_path("/person/42"), "/person/{id}");
        assert_eq!(
            sanitize_path("/person/officesheld/42"),
            "/person/officesheld/{id}"
        );
        assert_eq!(sanitize_path("/person/42/samename"), "/person/{id}/samename");
        assert_eq!(sanitize_path("/person/42/other"), "/other");
        assert_eq!(sanitize_path("/ops/healthz"), "/ops/healthz");
        assert_eq!(sanitize_path("/wp-admin/setup.php"), "/other");
    }

    #[test]
    fn test_extract_search_target() {
        assert_eq!(extract_search_target("/person/search/"), Some("person"));
        assert_eq!(
            extract_search_target("/corporation/search"),
            Some("corporation")
        );
        assert_eq!(extract_search_target("/person/42"), None);
    }
}
