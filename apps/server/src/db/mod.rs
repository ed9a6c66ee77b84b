//! Database layer - registry access

pub mod memory;
pub mod search;
pub mod store;
pub mod traits;

pub use memory::{Fixtures, MemoryStore};
pub use search::SearchQuery;
pub use store::PostgresSearchStore;
pub use traits::{PoolStatus, SearchStore};
