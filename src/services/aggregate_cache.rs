//! Cache-or-populate orchestrator for named aggregates.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::domain::errors::CatalogResult;
use crate::domain::models::{Aggregate, CachedAggregate, CatalogRecord};
use crate::domain::ports::AggregateStore;

type KeyLock = tokio::sync::Mutex<()>;

/// Cache-aside coordinator in front of an [`AggregateStore`].
///
/// A fresh entry is served without upstream traffic. A miss runs the
/// populate future exactly once for the requesting flow and writes its result
/// only after it completes, so failed or cancelled populations never reach
/// the store.
pub struct AggregateCache<S: AggregateStore + ?Sized> {
    store: Arc<S>,
    /// Per-key guards serialising concurrent misses; `None` disables coalescing
    in_flight: Option<Mutex<HashMap<String, Weak<KeyLock>>>>,
}

impl<S: AggregateStore + ?Sized> AggregateCache<S> {
    /// Create an orchestrator with miss coalescing enabled.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            in_flight: Some(Mutex::new(HashMap::new())),
        }
    }

    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.in_flight = enabled.then(|| Mutex::new(HashMap::new()));
        self
    }

    /// Serve `key` from the store, or populate, store with `ttl`, and serve.
    ///
    /// Population errors propagate unchanged and leave the key unset.
    #[instrument(skip(self, populate), fields(ttl_secs = ttl.as_secs()))]
    pub async fn get_aggregate<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        populate: F,
    ) -> CatalogResult<Arc<Aggregate>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<Aggregate>>,
    {
        if let Some(aggregate) = self.lookup(key).await {
            debug!("cache hit");
            return Ok(aggregate);
        }

        let _guard = match self.key_lock(key) {
            Some(lock) => {
                let guard = lock.lock_owned().await;
                // Another flow may have populated while we waited.
                if let Some(aggregate) = self.lookup(key).await {
                    debug!("cache hit after waiting on in-flight population");
                    return Ok(aggregate);
                }
                Some(guard)
            }
            None => None,
        };

        info!("cache miss, populating");
        let aggregate = match populate().await {
            Ok(aggregate) => Arc::new(aggregate),
            Err(err) => {
                error!(error = %err, "population failed");
                return Err(err);
            }
        };

        self.store
            .set(key, CachedAggregate::new(Arc::clone(&aggregate), ttl), ttl)
            .await;
        info!(records = aggregate.records.len(), "aggregate stored");
        Ok(aggregate)
    }

    /// Like [`get_aggregate`](Self::get_aggregate), then narrow the collection
    /// by a case-insensitive name substring.
    ///
    /// Filtering happens on a copy; the cached aggregate is never altered and
    /// filtered results are never stored.
    pub async fn get_filtered<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        search: Option<&str>,
        populate: F,
    ) -> CatalogResult<Vec<CatalogRecord>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = CatalogResult<Aggregate>>,
    {
        let aggregate = self.get_aggregate(key, ttl, populate).await?;
        Ok(match search {
            Some(term) if !term.trim().is_empty() => aggregate.filter_by_name(term),
            _ => aggregate.records.clone(),
        })
    }

    async fn lookup(&self, key: &str) -> Option<Arc<Aggregate>> {
        self.store
            .get(key)
            .await
            .filter(CachedAggregate::is_fresh)
            .map(|cached| cached.aggregate)
    }

    fn key_lock(&self, key: &str) -> Option<Arc<KeyLock>> {
        let in_flight = self.in_flight.as_ref()?;
        let mut locks = in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(lock) = locks.get(key).and_then(Weak::upgrade) {
            return Some(lock);
        }

        locks.retain(|_, lock| lock.strong_count() > 0);
        let lock = Arc::new(KeyLock::new(()));
        locks.insert(key.to_string(), Arc::downgrade(&lock));
        Some(lock)
    }
}
