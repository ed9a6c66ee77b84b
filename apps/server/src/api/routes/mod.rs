//! Route tables, one per API area

pub mod detail;
pub mod metrics;
pub mod ops;
pub mod search;
