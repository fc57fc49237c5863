//! `AggregateStore` backed by a moka TTL cache.

use async_trait::async_trait;
use moka::future::Cache;
use moka::Expiry;
use std::time::{Duration, Instant};

use crate::domain::models::CachedAggregate;
use crate::domain::ports::AggregateStore;

/// Default maximum number of cached aggregates.
const DEFAULT_MAX_CAPACITY: u64 = 256;

/// Expires each entry after the TTL it carries.
struct PerEntryTtl;

impl Expiry<String, CachedAggregate> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedAggregate,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedAggregate,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-local aggregate store.
///
/// Constructed once per process and handed to the orchestrator; clones share
/// the same underlying cache.
#[derive(Clone)]
pub struct MokaAggregateStore {
    cache: Cache<String, CachedAggregate>,
}

impl MokaAggregateStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    pub fn with_capacity(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }
}

impl Default for MokaAggregateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AggregateStore for MokaAggregateStore {
    async fn get(&self, key: &str) -> Option<CachedAggregate> {
        self.cache.get(key).await
    }

    async fn set(&self, key: &str, mut value: CachedAggregate, ttl: Duration) {
        value.ttl = ttl;
        self.cache.insert(key.to_string(), value).await;
    }
}
