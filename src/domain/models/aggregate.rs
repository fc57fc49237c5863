//! Cached aggregates: named, TTL-bound snapshots of resolved collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use super::record::CatalogRecord;

/// A resolved collection plus the listing metadata it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub records: Vec<CatalogRecord>,
    /// Size of the whole upstream catalog the collection was windowed from
    pub total_count: u64,
    pub has_next: bool,
}

impl Aggregate {
    /// Aggregate covering an entire catalog.
    pub fn complete(records: Vec<CatalogRecord>) -> Self {
        let total_count = records.len() as u64;
        Self {
            records,
            total_count,
            has_next: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(CatalogRecord::name).collect()
    }

    /// Case-insensitive substring match on record names, in collection order.
    ///
    /// A blank term matches everything.
    pub fn filter_by_name(&self, term: &str) -> Vec<CatalogRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.clone();
        }
        self.records
            .iter()
            .filter(|record| record.name().to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// An aggregate as held by the cache store.
#[derive(Debug, Clone)]
pub struct CachedAggregate {
    pub aggregate: Arc<Aggregate>,
    pub populated_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CachedAggregate {
    pub fn new(aggregate: Arc<Aggregate>, ttl: Duration) -> Self {
        Self {
            aggregate,
            populated_at: Utc::now(),
            ttl,
        }
    }

    /// Whether the snapshot is still within its time-to-live at `now`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| self.populated_at.checked_add_signed(ttl))
            .is_some_and(|expires_at| now < expires_at)
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}
