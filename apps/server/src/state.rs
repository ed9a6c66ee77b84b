//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    config::Config,
    db::{PostgresSearchStore, SearchStore},
    services::{DetailService, SearchService},
    Result,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn SearchStore>,
    pub search: Arc<SearchService>,
    pub detail: Arc<DetailService>,
}

impl AppState {
    /// State backed by PostgreSQL. The pool connects lazily.
    pub async fn new(config: Config) -> Result<Self> {
        let store = PostgresSearchStore::connect_lazy(&config.database)?;
        tracing::info!(
            pool_min_size = config.database.pool_min_size,
            pool_max_size = config.database.pool_max_size,
            "Database pool configured"
        );
        Ok(Self::with_store(config, Arc::new(store)))
    }

    pub fn with_store(config: Config, store: Arc<dyn SearchStore>) -> Self {
        let search = SearchService::new(store.clone(), config.search.page_size);
        let detail = DetailService::new(store.clone());
        Self {
            config: Arc::new(config),
            store,
            search: Arc::new(search),
            detail: Arc::new(detail),
        }
    }
}
