// src/state.rs

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRef;

use crate::config::Config;
use crate::store::{PracticeStore, cache::FacetCache};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PracticeStore>,
    pub config: Config,
    pub facet_cache: Arc<FacetCache>,
}

impl AppState {
    pub fn new(store: Arc<dyn PracticeStore>, config: Config) -> Self {
        let facet_cache = Arc::new(FacetCache::new(Duration::from_secs(config.facet_cache_ttl)));
        Self {
            store,
            config,
            facet_cache,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn PracticeStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
