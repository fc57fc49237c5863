use async_trait::async_trait;
use std::time::Duration;

use crate::domain::models::CachedAggregate;

/// Pluggable key/value store for cached aggregates.
///
/// Writes are last-writer-wins per key. No delete or invalidate operation is
/// part of the contract; entries leave the store when their TTL lapses.
#[async_trait]
pub trait AggregateStore: Send + Sync {
    /// Look up an entry; expired entries may be returned by stores without
    /// native expiry, so callers check freshness themselves.
    async fn get(&self, key: &str) -> Option<CachedAggregate>;

    /// Store an entry for at most `ttl`.
    async fn set(&self, key: &str, value: CachedAggregate, ttl: Duration);
}
