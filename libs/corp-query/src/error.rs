use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Validation failures raised while turning a search request into a predicate.
///
/// All variants are client errors: terminal for the request and never retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    #[error("malformed clause: {0}")]
    MalformedClause(String),

    #[error("missing query: {0}")]
    MissingQuery(String),
}

impl QueryError {
    /// Stable machine-readable kind, used in error bodies and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidField(_) => "invalid_field",
            Self::InvalidOperator(_) => "invalid_operator",
            Self::MalformedClause(_) => "malformed_clause",
            Self::MissingQuery(_) => "missing_query",
        }
    }
}
