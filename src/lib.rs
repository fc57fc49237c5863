//! Pokecache - cached, paginated views over the PokeAPI catalog
//!
//! Pokecache resolves listing pages of the upstream catalog into full entity
//! records by fanning out one request per entry, joins linked entities
//! (berries and their items) into composite records, and keeps the resolved
//! collections in a TTL-bound cache so repeated views cost no upstream traffic.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Records, errors and the port traits
//! - **Service Layer** (`services`): Fan-out, composite assembly, cache-aside and pagination
//! - **Infrastructure Layer** (`infrastructure`): HTTP client, cache store, config and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use pokecache::{CatalogService, MokaAggregateStore, PokeApiClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = Arc::new(PokeApiClient::new()?);
//!     let service = CatalogService::new(client, Arc::new(MokaAggregateStore::new()));
//!     let outcome = service.pokedex_page(Some("2")).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Aggregate, CachedAggregate, CatalogRecord, CompositeRecord, Config, EntityRecord, ListWindow,
    ListingPage, PageOutcome, PageView, PokemonRecord, ResourceKind,
};
pub use domain::ports::{AggregateStore, CatalogClient};
pub use domain::{CatalogError, CatalogResult, UpstreamError};
pub use infrastructure::cache::MokaAggregateStore;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::pokeapi::PokeApiClient;
pub use services::{
    AggregateCache, CatalogService, CompositeAssembler, CompositeLink, FanOutFetcher,
    PaginationPolicy, Verifier,
};
