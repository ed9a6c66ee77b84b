//! corpsearch - read-only search API over a corporate registry
//!
//! Requests are compiled into predicates by `corpsearch-query` and executed
//! against the registry through a [`db::SearchStore`]: PostgreSQL in
//! production, an in-memory store for tests and fixture mode.

#![allow(clippy::type_complexity)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
