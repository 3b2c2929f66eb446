// src/store/cache.rs

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::facet::{FacetDimension, FacetValue};
use crate::store::PracticeStore;

struct CachedEntry {
    fetched_at: Instant,
    values: Vec<FacetValue>,
}

/// TTL cache for facet listings, owned by the composing `AppState` rather
/// than living as a module-level singleton. Serves the last-known-good
/// value when a refresh fails, so catalog reads degrade instead of
/// erroring.
pub struct FacetCache {
    ttl: Duration,
    entries: RwLock<HashMap<(FacetDimension, Option<i64>), CachedEntry>>,
}

impl FacetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(
        &self,
        store: &Arc<dyn PracticeStore>,
        dimension: FacetDimension,
        parent: Option<i64>,
    ) -> Result<Vec<FacetValue>, AppError> {
        let key = (dimension, parent);

        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(&key) {
                if entry.fetched_at.elapsed() < self.ttl {
                    return Ok(entry.values.clone());
                }
            }
        }

        match store.list_facet_values(dimension, parent).await {
            Ok(values) => {
                let mut entries = self.entries.write().await;
                entries.insert(
                    key,
                    CachedEntry {
                        fetched_at: Instant::now(),
                        values: values.clone(),
                    },
                );
                Ok(values)
            }
            Err(err) => {
                let entries = self.entries.read().await;
                if let Some(stale) = entries.get(&key) {
                    tracing::warn!(?dimension, "Facet refresh failed, serving stale: {}", err);
                    Ok(stale.values.clone())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Drops every cached listing; the next read refetches.
    pub async fn invalidate(&self) {
        self.entries.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::models::answer::{AnswerHistoryRow, NewAnswer};
    use crate::models::leaderboard::XpRow;
    use crate::models::progress::UserProgress;
    use crate::models::question::Question;
    use crate::store::AccuracyCounts;

    #[derive(Default)]
    struct FlakyStore {
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PracticeStore for FlakyStore {
        async fn list_facet_values(
            &self,
            _dimension: FacetDimension,
            _parent: Option<i64>,
        ) -> Result<Vec<FacetValue>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(AppError::Unavailable("store down".to_string()))
            } else {
                Ok(vec![FacetValue {
                    id: 1,
                    label: "Math".to_string(),
                    parent_id: None,
                }])
            }
        }

        async fn list_active_questions(&self) -> Result<Vec<Question>, AppError> {
            Ok(Vec::new())
        }

        async fn get_question(&self, _id: i64) -> Result<Option<Question>, AppError> {
            Ok(None)
        }

        async fn answer_history(&self, _user_id: i64) -> Result<Vec<AnswerHistoryRow>, AppError> {
            Ok(Vec::new())
        }

        async fn record_answer(&self, _answer: &NewAnswer, _xp_delta: i64) -> Result<(), AppError> {
            Ok(())
        }

        async fn get_progress(&self, user_id: i64) -> Result<UserProgress, AppError> {
            Ok(UserProgress {
                user_id,
                ..Default::default()
            })
        }

        async fn list_users_by_xp(
            &self,
            _active_since: Option<DateTime<Utc>>,
        ) -> Result<Vec<XpRow>, AppError> {
            Ok(Vec::new())
        }

        async fn accuracy_for_users(
            &self,
            _user_ids: &[i64],
        ) -> Result<HashMap<i64, AccuracyCounts>, AppError> {
            Ok(HashMap::new())
        }
    }

    fn flaky() -> (Arc<FlakyStore>, Arc<dyn PracticeStore>) {
        let store = Arc::new(FlakyStore::default());
        let dyn_store: Arc<dyn PracticeStore> = store.clone();
        (store, dyn_store)
    }

    #[tokio::test]
    async fn fresh_entries_are_served_without_refetching() {
        let (store, dyn_store) = flaky();
        let cache = FacetCache::new(Duration::from_secs(60));

        for _ in 0..3 {
            let values = cache
                .get(&dyn_store, FacetDimension::Subject, None)
                .await
                .unwrap();
            assert_eq!(values.len(), 1);
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalidate_forces_a_refetch() {
        let (store, dyn_store) = flaky();
        let cache = FacetCache::new(Duration::from_secs(60));

        cache
            .get(&dyn_store, FacetDimension::Subject, None)
            .await
            .unwrap();
        cache.invalidate().await;
        cache
            .get(&dyn_store, FacetDimension::Subject, None)
            .await
            .unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_refresh_serves_the_stale_value() {
        let (store, dyn_store) = flaky();
        let cache = FacetCache::new(Duration::ZERO);

        let first = cache
            .get(&dyn_store, FacetDimension::Subject, None)
            .await
            .unwrap();
        store.fail.store(true, Ordering::SeqCst);
        let second = cache
            .get(&dyn_store, FacetDimension::Subject, None)
            .await
            .unwrap();
        assert_eq!(second.len(), first.len());
        assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_with_nothing_cached_propagates() {
        let (store, dyn_store) = flaky();
        store.fail.store(true, Ordering::SeqCst);
        let cache = FacetCache::new(Duration::from_secs(60));

        let got = cache.get(&dyn_store, FacetDimension::Subject, None).await;
        assert!(matches!(got, Err(AppError::Unavailable(_))));
    }
}
