//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - CatalogClient: single-entity and listing access to the upstream catalog
//! - AggregateStore: TTL-bound storage for resolved collections
//!
//! Services depend only on these traits, so tests substitute in-memory fakes.

pub mod aggregate_store;
pub mod catalog_client;

pub use aggregate_store::AggregateStore;
pub use catalog_client::CatalogClient;
