//! Request handlers for API endpoints
//!
//! Handlers extract parameters, call a service and serialize the result.
//! Errors are rendered by [`crate::Error`]'s `IntoResponse`.

pub mod detail;
pub mod metrics;
pub mod ops;
pub mod search;
