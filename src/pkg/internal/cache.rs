//! Whole-collection read cache for the vacancy list.
//!
//! Readers share a reference-counted snapshot, so the lock is held only to
//! clone an `Arc`. Store fetches never run under the lock: a cold read fetches
//! first and takes the write lock just to publish.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::pkg::internal::adaptors::vacancies::spec::VacancyEntry;
use crate::prelude::Result;

pub type Snapshot = Arc<Vec<VacancyEntry>>;

#[derive(Default)]
struct Slot {
    // bumped on every invalidation; a fetch that started under an older
    // generation must not publish
    generation: u64,
    entries: Option<Snapshot>,
}

#[derive(Default)]
pub struct VacancyCache {
    slot: RwLock<Slot>,
}

impl VacancyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached list, or runs `fetch` and publishes its result.
    ///
    /// Concurrent callers on a cold cache may each call `fetch`. A failed
    /// fetch leaves the cache empty.
    pub async fn list_or_fetch<F, Fut>(&self, fetch: F) -> Result<Snapshot>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<VacancyEntry>>>,
    {
        let generation = {
            let slot = self.slot.read().await;
            if let Some(entries) = &slot.entries {
                return Ok(Arc::clone(entries));
            }
            slot.generation
        };

        let entries: Snapshot = Arc::new(fetch().await?);

        let mut slot = self.slot.write().await;
        if slot.generation == generation {
            slot.entries = Some(Arc::clone(&entries));
        } else {
            tracing::debug!("vacancy cache invalidated during fetch, not publishing");
        }
        Ok(entries)
    }

    /// Looks `id` up in the cached list, falling back to `fetch` when the
    /// cache is cold or does not hold it. Never populates the cache.
    pub async fn find_or_fetch<F, Fut>(&self, id: i64, fetch: F) -> Result<Option<VacancyEntry>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<VacancyEntry>>>,
    {
        let cached = self.slot.read().await.entries.clone();
        if let Some(hit) = cached.as_deref().and_then(|e| e.iter().find(|v| v.id == id)) {
            return Ok(Some(hit.clone()));
        }
        fetch().await
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.entries = None;
    }

    pub async fn is_populated(&self) -> bool {
        self.slot.read().await.entries.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use chrono::Utc;
    use serde_json::Value;
    use tokio::sync::{Mutex, oneshot};
    use tracing_test::traced_test;

    use super::*;
    use crate::prelude::Error;

    fn vacancy(id: i64, title: &str) -> VacancyEntry {
        VacancyEntry {
            id,
            title: title.into(),
            subtitle: String::new(),
            description: String::new(),
            header_image: String::new(),
            bg_gradient: String::new(),
            requirements: Value::Null,
            tech_stack: Value::Null,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Stand-in store: a shared list plus a fetch counter.
    #[derive(Default)]
    struct Store {
        rows: Mutex<Vec<VacancyEntry>>,
        fetches: AtomicUsize,
    }

    impl Store {
        async fn fetch_all(&self) -> Result<Vec<VacancyEntry>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().await.clone())
        }

        async fn fetch_one(&self, id: i64) -> Result<Option<VacancyEntry>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.lock().await.iter().find(|v| v.id == id).cloned())
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn warm_cache_does_not_touch_store() -> Result<()> {
        let store = Store::default();
        store.rows.lock().await.push(vacancy(1, "Engineer"));
        let cache = VacancyCache::new();

        let first = cache.list_or_fetch(|| store.fetch_all()).await?;
        let second = cache.list_or_fetch(|| store.fetch_all()).await?;

        assert_eq!(store.fetches(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn invalidate_forces_refetch_of_latest_rows() -> Result<()> {
        let store = Store::default();
        store.rows.lock().await.push(vacancy(1, "Engineer"));
        let cache = VacancyCache::new();
        cache.list_or_fetch(|| store.fetch_all()).await?;

        store.rows.lock().await[0].title = "Senior Engineer".into();
        cache.invalidate().await;
        assert!(!cache.is_populated().await);

        let list = cache.list_or_fetch(|| store.fetch_all()).await?;
        assert_eq!(store.fetches(), 2);
        assert_eq!(list[0].title, "Senior Engineer");
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn failed_fetch_caches_nothing_and_next_call_retries() -> Result<()> {
        let cache = VacancyCache::new();
        let err = cache
            .list_or_fetch(|| async {
                Err::<Vec<VacancyEntry>, _>(Error::Database(sqlx::Error::PoolTimedOut))
            })
            .await;
        assert!(matches!(err, Err(Error::Database(_))));
        assert!(!cache.is_populated().await);

        let store = Store::default();
        cache.list_or_fetch(|| store.fetch_all()).await?;
        assert_eq!(store.fetches(), 1);
        assert!(cache.is_populated().await);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn find_serves_hits_from_cache_and_misses_from_store() -> Result<()> {
        let store = Store::default();
        store.rows.lock().await.push(vacancy(1, "Engineer"));
        let cache = VacancyCache::new();

        // cold: straight to the store, cache stays empty
        let cold = cache.find_or_fetch(1, || store.fetch_one(1)).await?;
        assert_eq!(cold.map(|v| v.id), Some(1));
        assert_eq!(store.fetches(), 1);
        assert!(!cache.is_populated().await);

        cache.list_or_fetch(|| store.fetch_all()).await?;
        let hit = cache.find_or_fetch(1, || store.fetch_one(1)).await?;
        assert_eq!(hit.map(|v| v.title), Some("Engineer".to_string()));
        assert_eq!(store.fetches(), 2);

        // only in the store: populated cache misses, store answers
        store.rows.lock().await.push(vacancy(2, "Designer"));
        let fallthrough = cache.find_or_fetch(2, || store.fetch_one(2)).await?;
        assert_eq!(fallthrough.map(|v| v.id), Some(2));
        assert_eq!(store.fetches(), 3);

        let missing = cache.find_or_fetch(9, || store.fetch_one(9)).await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn fetch_racing_an_invalidation_is_not_published() -> Result<()> {
        let cache = Arc::new(VacancyCache::new());
        let (started_tx, started_rx) = oneshot::channel::<()>();
        let (release_tx, release_rx) = oneshot::channel::<()>();

        let reader = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .list_or_fetch(|| async move {
                        // snapshot taken before the write commits
                        let stale = vec![vacancy(1, "Engineer")];
                        let _ = started_tx.send(());
                        let _ = release_rx.await;
                        Ok::<_, Error>(stale)
                    })
                    .await
            })
        };

        started_rx.await.unwrap();
        cache.invalidate().await;
        release_tx.send(()).unwrap();

        let stale = reader.await.unwrap()?;
        assert_eq!(stale[0].title, "Engineer");
        assert!(!cache.is_populated().await);

        let fresh = cache
            .list_or_fetch(|| async { Ok::<_, Error>(vec![vacancy(1, "Senior Engineer")]) })
            .await?;
        assert_eq!(fresh[0].title, "Senior Engineer");
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[traced_test]
    async fn concurrent_cold_readers_see_same_content() -> Result<()> {
        let store = Arc::new(Store::default());
        store
            .rows
            .lock()
            .await
            .extend((1..=50).map(|i| vacancy(i, &format!("role {i}"))));
        let cache = Arc::new(VacancyCache::new());

        let mut readers = Vec::new();
        for _ in 0..16 {
            let (cache, store) = (Arc::clone(&cache), Arc::clone(&store));
            readers.push(tokio::spawn(async move {
                cache
                    .list_or_fetch(|| async {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        store.fetch_all().await
                    })
                    .await
            }));
        }

        let expected = store.rows.lock().await.clone();
        for reader in readers {
            assert_eq!(*reader.await.unwrap()?, expected);
        }
        assert!(store.fetches() >= 1 && store.fetches() <= 16);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[traced_test]
    async fn readers_never_observe_torn_lists_under_writes() -> Result<()> {
        // every generation of the store is a full list whose titles all match
        let store = Arc::new(Store::default());
        *store.rows.lock().await = (1..=20).map(|i| vacancy(i, "gen 0")).collect();
        let cache = Arc::new(VacancyCache::new());

        let writer = {
            let (cache, store) = (Arc::clone(&cache), Arc::clone(&store));
            tokio::spawn(async move {
                for round in 1..=50 {
                    {
                        let mut rows = store.rows.lock().await;
                        for row in rows.iter_mut() {
                            row.title = format!("gen {round}");
                        }
                    }
                    cache.invalidate().await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let mut readers = Vec::new();
        for _ in 0..8 {
            let (cache, store) = (Arc::clone(&cache), Arc::clone(&store));
            readers.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let list = cache.list_or_fetch(|| store.fetch_all()).await?;
                    assert_eq!(list.len(), 20);
                    assert!(list.iter().all(|v| v.title == list[0].title));
                }
                Ok::<(), Error>(())
            }));
        }

        writer.await.unwrap();
        for reader in readers {
            reader.await.unwrap()?;
        }

        // all writes done and invalidated: the next read is current
        let list = cache.list_or_fetch(|| store.fetch_all()).await?;
        assert!(list.iter().all(|v| v.title == "gen 50"));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn one_fetch_per_reader_that_sees_the_cold_state() -> Result<()> {
        let store = Store::default();
        let cache = VacancyCache::new();
        for round in 1..=3 {
            cache.invalidate().await;
            cache.list_or_fetch(|| store.fetch_all()).await?;
            cache.list_or_fetch(|| store.fetch_all()).await?;
            assert_eq!(store.fetches(), round);
        }
        Ok(())
    }
}
