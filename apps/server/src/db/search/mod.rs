//! Search execution against the registry join.

pub mod query_builder;

use corpsearch_query::{OrderKey, Predicate, SearchTarget};

pub use query_builder::{BindValue, QueryBuilder};

/// Everything a store needs to run one search page.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Selects the join and the projected row shape.
    pub target: SearchTarget,
    pub predicate: Predicate,
    pub order: Vec<OrderKey>,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

impl SearchQuery {
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.page_size)
    }

    pub fn query_builder(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(
            self.target,
            &self.predicate,
            &self.order,
            self.limit(),
            self.offset(),
        )
    }
}
