//! Business logic between the HTTP handlers and the store.

pub mod detail;
pub mod search;

pub use detail::{format_office_type, DetailService};
pub use search::{Composition, SearchRequest, SearchService};
