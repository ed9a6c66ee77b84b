//! Query composition for corporate registry search.
//!
//! Turns client-supplied `(field, operator, value)` clauses into a predicate
//! tree over a closed set of searchable fields, and resolves a deterministic
//! ordering. Nothing here touches storage: callers lower [`Predicate`] to their
//! query language or evaluate it in memory through [`Record`].
//!
//! ```
//! use corpsearch_query::{combine, compile_clause, Clause, Mode};
//!
//! let clauses = [
//!     Clause::new("any_name", "startswith", "sky"),
//!     Clause::new("state_type_code", "exact", "ACT"),
//! ];
//! let predicates = clauses
//!     .iter()
//!     .map(compile_clause)
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! let predicate = combine(predicates, Mode::All).unwrap();
//! assert_eq!(predicate.comparisons().len(), 4);
//! ```

#![forbid(unsafe_code)]

mod combine;
mod compile;
mod error;
mod like;
mod predicate;
mod registry;
mod sort;

pub use combine::{combine, Mode};
pub use compile::{compile_clause, Clause, ANY_ADDRESS, ANY_NAME, STATE_ACTIVE};
pub use error::{QueryError, Result};
pub use like::escape_like;
#[cfg(feature = "regex")]
pub use like::{ilike, like_regex};
pub use predicate::{Comparison, FieldValue, Operator, Predicate, Record};
pub use registry::{Entity, Field, ValueType};
pub use sort::{compare_records, resolve_sort, Direction, OrderKey, SearchTarget};
