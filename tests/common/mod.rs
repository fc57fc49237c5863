//! Common test utilities for integration tests
//!
//! Provides an in-memory catalog with call counters and per-key latency, a
//! store wrapper that counts writes, and payload fixtures.

#![allow(dead_code)]

use async_trait::async_trait;
use pokecache::domain::errors::{CatalogError, CatalogResult, UpstreamError};
use pokecache::domain::models::{
    CachedAggregate, EntityRecord, ListWindow, ListingPage, ResourceKind, Stub,
};
use pokecache::domain::ports::{AggregateStore, CatalogClient};
use pokecache::infrastructure::cache::MokaAggregateStore;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Setup test logging
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// In-memory stand-in for the upstream catalog.
///
/// Every entity request sleeps for a key-dependent delay so completion order
/// differs from request order.
#[derive(Default)]
pub struct FakeCatalog {
    bodies: HashMap<(ResourceKind, String), String>,
    listings: HashMap<ResourceKind, Vec<String>>,
    failing: Mutex<HashSet<(ResourceKind, String)>>,
    failing_listings: Mutex<HashSet<ResourceKind>>,
    max_delay_ms: u64,
    entity_calls: AtomicUsize,
    list_calls: AtomicUsize,
    exists_calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self {
            max_delay_ms: 15,
            ..Self::default()
        }
    }

    pub fn without_latency(mut self) -> Self {
        self.max_delay_ms = 0;
        self
    }

    /// Register pokemon in listing order; types are comma-separated.
    pub fn with_pokemon(mut self, entries: &[(&str, &str)]) -> Self {
        for (name, types) in entries {
            let id = self.listing_len(ResourceKind::Pokemon) + 1;
            let types: Vec<&str> = types.split(',').collect();
            self = self.with_entity(ResourceKind::Pokemon, name, pokemon_body(id, name, &types));
            self.listings
                .entry(ResourceKind::Pokemon)
                .or_default()
                .push((*name).to_string());
        }
        self
    }

    /// Register `count` pokemon named `pokemon-1` .. `pokemon-{count}`.
    pub fn with_numbered_pokemon(self, count: usize) -> Self {
        let names: Vec<String> = (1..=count).map(|i| format!("pokemon-{i}")).collect();
        let entries: Vec<(&str, &str)> = names.iter().map(|name| (name.as_str(), "normal")).collect();
        self.with_pokemon(&entries)
    }

    /// Register berries together with the items they link to.
    pub fn with_berries(mut self, entries: &[(&str, &str)]) -> Self {
        for (berry, item) in entries {
            let id = self.listing_len(ResourceKind::Berry) + 1;
            self = self
                .with_entity(ResourceKind::Berry, berry, berry_body(id, berry, item))
                .with_entity(ResourceKind::Item, item, item_body(id + 125, item));
            self.listings
                .entry(ResourceKind::Berry)
                .or_default()
                .push((*berry).to_string());
        }
        self
    }

    pub fn with_types(mut self, names: &[&str]) -> Self {
        self.listings.insert(
            ResourceKind::Type,
            names.iter().map(|name| (*name).to_string()).collect(),
        );
        self
    }

    /// Register a raw body, listed or not.
    pub fn with_entity(mut self, kind: ResourceKind, key: &str, body: String) -> Self {
        self.bodies.insert((kind, key.to_string()), body);
        self
    }

    /// Add a stub to a listing without a resolvable entity behind it.
    pub fn with_dangling_stub(mut self, kind: ResourceKind, name: &str) -> Self {
        self.listings.entry(kind).or_default().push(name.to_string());
        self
    }

    /// Make every fetch of this entity fail with a 503 until [`heal`](Self::heal).
    pub fn fail(&self, kind: ResourceKind, key: &str) {
        lock(&self.failing).insert((kind, key.to_string()));
    }

    pub fn fail_listing(&self, kind: ResourceKind) {
        lock(&self.failing_listings).insert(kind);
    }

    pub fn heal(&self) {
        lock(&self.failing).clear();
        lock(&self.failing_listings).clear();
    }

    pub fn entity_calls(&self) -> usize {
        self.entity_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    /// Highest number of entity requests observed in flight at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn listing_len(&self, kind: ResourceKind) -> usize {
        self.listings.get(&kind).map_or(0, Vec::len)
    }

    fn delay_for(&self, key: &str) -> Duration {
        if self.max_delay_ms == 0 {
            return Duration::ZERO;
        }
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        Duration::from_millis(hasher.finish() % (self.max_delay_ms + 1))
    }
}

fn unavailable() -> CatalogError {
    UpstreamError::Status {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: "maintenance".to_string(),
    }
    .into()
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogClient for FakeCatalog {
    async fn fetch_entity(&self, kind: ResourceKind, key: &str) -> CatalogResult<EntityRecord> {
        self.entity_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        tokio::time::sleep(self.delay_for(key)).await;

        if lock(&self.failing).contains(&(kind, key.to_string())) {
            return Err(unavailable());
        }
        let body = self
            .bodies
            .get(&(kind, key.to_string()))
            .ok_or_else(|| CatalogError::not_found(kind, key))?;
        EntityRecord::decode(kind, body.as_bytes())
    }

    async fn fetch_list(&self, kind: ResourceKind, window: ListWindow) -> CatalogResult<ListingPage> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if lock(&self.failing_listings).contains(&kind) {
            return Err(unavailable());
        }

        let names = self.listings.get(&kind).cloned().unwrap_or_default();
        let total = names.len();
        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX).min(total);
        let end = window
            .limit
            .map_or(total, |limit| (offset + limit as usize).min(total));

        Ok(ListingPage {
            total_count: total as u64,
            has_next: end < total,
            stubs: names[offset..end]
                .iter()
                .map(|name| Stub {
                    name: name.clone(),
                    reference: format!("https://pokeapi.co/api/v2/{kind}/{name}/"),
                })
                .collect(),
        })
    }

    async fn exists_entity(&self, kind: ResourceKind, name: &str) -> CatalogResult<bool> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if lock(&self.failing).contains(&(kind, name.to_string())) {
            return Err(unavailable());
        }
        Ok(self.bodies.contains_key(&(kind, name.to_string())))
    }
}

/// Store wrapper that counts writes.
#[derive(Default)]
pub struct CountingStore {
    inner: MokaAggregateStore,
    sets: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AggregateStore for CountingStore {
    async fn get(&self, key: &str) -> Option<CachedAggregate> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: CachedAggregate, ttl: Duration) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value, ttl).await;
    }
}

pub fn pokemon_body(id: usize, name: &str, types: &[&str]) -> String {
    json!({
        "id": id,
        "name": name,
        "order": id,
        "sprites": {
            "front_default": format!("https://img.example/{id}.png"),
            "other": { "official-artwork": { "front_default": format!("https://img.example/art/{id}.png") } }
        },
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } }
        ],
        "types": types.iter().enumerate().map(|(slot, type_name)| json!({
            "slot": slot + 1,
            "type": { "name": type_name, "url": "" }
        })).collect::<Vec<_>>()
    })
    .to_string()
}

pub fn berry_body(id: usize, name: &str, item: &str) -> String {
    json!({
        "id": id,
        "name": name,
        "item": { "name": item, "url": format!("https://pokeapi.co/api/v2/item/{item}/") }
    })
    .to_string()
}

pub fn item_body(id: usize, name: &str) -> String {
    json!({
        "id": id,
        "name": name,
        "effect_entries": [{
            "effect": format!("Effect of {name}."),
            "short_effect": format!("Short effect of {name}.")
        }],
        "sprites": { "default": format!("https://img.example/items/{name}.png") }
    })
    .to_string()
}
