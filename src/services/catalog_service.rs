//! Listing flows: pagination, fan-out resolution and cache-aside wired together.

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

use super::aggregate_cache::AggregateCache;
use super::composite::{CompositeAssembler, CompositeLink};
use super::fan_out::FanOutFetcher;
use super::pagination::PaginationPolicy;
use crate::domain::errors::CatalogResult;
use crate::domain::models::{
    Aggregate, CatalogRecord, Config, ListWindow, ListingPage, PageOutcome, PokemonRecord,
    ResourceKind,
};
use crate::domain::ports::{AggregateStore, CatalogClient};

/// How stubs of a listing are turned into records.
#[derive(Debug, Clone, Copy)]
enum Resolution {
    Entities(ResourceKind),
    Composite(CompositeLink),
}

impl Resolution {
    const fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Berry => Self::Composite(CompositeLink::berry_item()),
            other => Self::Entities(other),
        }
    }
}

/// TTLs applied to the aggregates this service stores.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub page: Duration,
    pub catalog: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            page: Duration::from_secs(900),
            catalog: Duration::from_secs(3_600),
        }
    }
}

/// Entry point for the presentation layer.
pub struct CatalogService<C: CatalogClient + ?Sized, S: AggregateStore + ?Sized> {
    client: Arc<C>,
    fan_out: FanOutFetcher<C>,
    assembler: CompositeAssembler<C>,
    cache: AggregateCache<S>,
    pagination: PaginationPolicy,
    ttls: CacheTtls,
}

impl<C: CatalogClient + ?Sized, S: AggregateStore + ?Sized> CatalogService<C, S> {
    pub fn new(client: Arc<C>, store: Arc<S>) -> Self {
        let fan_out = FanOutFetcher::new(Arc::clone(&client));
        Self {
            assembler: CompositeAssembler::new(fan_out.clone()),
            fan_out,
            client,
            cache: AggregateCache::new(store),
            pagination: PaginationPolicy::default(),
            ttls: CacheTtls::default(),
        }
    }

    /// Build a service with every knob taken from `config`.
    pub fn from_config(client: Arc<C>, store: Arc<S>, config: &Config) -> Self {
        Self::new(client, store)
            .with_max_in_flight(config.fan_out.max_in_flight)
            .with_pagination(PaginationPolicy::new(config.pagination.page_size))
            .with_ttls(CacheTtls {
                page: config.cache.page_ttl(),
                catalog: config.cache.catalog_ttl(),
            })
            .with_coalescing(config.cache.coalesce_misses)
    }

    pub fn with_max_in_flight(mut self, max_in_flight: Option<usize>) -> Self {
        self.fan_out = self.fan_out.with_max_in_flight(max_in_flight);
        self.assembler = CompositeAssembler::new(self.fan_out.clone());
        self
    }

    pub const fn with_pagination(mut self, pagination: PaginationPolicy) -> Self {
        self.pagination = pagination;
        self
    }

    pub const fn with_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    pub fn with_coalescing(mut self, enabled: bool) -> Self {
        self.cache = self.cache.with_coalescing(enabled);
        self
    }

    /// One page of the pokedex, each stub resolved to a full pokemon record.
    pub async fn pokedex_page(&self, raw_page: Option<&str>) -> CatalogResult<PageOutcome> {
        self.listing_page(ResourceKind::Pokemon, raw_page).await
    }

    /// One page of berries, each resolved together with its linked item.
    pub async fn berries_page(&self, raw_page: Option<&str>) -> CatalogResult<PageOutcome> {
        self.listing_page(ResourceKind::Berry, raw_page).await
    }

    /// One page of any listing, cached per page under `{kind}:page:{n}`.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn listing_page(
        &self,
        kind: ResourceKind,
        raw_page: Option<&str>,
    ) -> CatalogResult<PageOutcome> {
        let page = PaginationPolicy::resolve_page(raw_page);
        let window = self.pagination.window(page);
        let key = format!("{kind}:page:{page}");

        let aggregate = self
            .cache
            .get_aggregate(&key, self.ttls.page, || async move {
                let listing = self.client.fetch_list(kind, window).await?;
                self.resolve_listing(kind, listing).await
            })
            .await?;

        let outcome = self.pagination.outcome(page, &aggregate);
        if let PageOutcome::Redirect { page: target } = outcome {
            info!(requested = page, redirect_to = target, "page out of range");
        }
        Ok(outcome)
    }

    /// Records of `kind` whose name contains `term`, from the whole-catalog
    /// aggregate. A blank term returns the entire catalog.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn search(&self, kind: ResourceKind, term: &str) -> CatalogResult<Vec<CatalogRecord>> {
        let key = format!("{kind}:all");
        self.cache
            .get_filtered(&key, self.ttls.catalog, Some(term), || async move {
                let listing = self.client.fetch_list(kind, ListWindow::all()).await?;
                let mut aggregate = self.resolve_listing(kind, listing).await?;
                aggregate.has_next = false;
                Ok(aggregate)
            })
            .await
    }

    /// A single pokemon by name or id, uncached.
    #[instrument(skip(self))]
    pub async fn pokemon_detail(&self, key: &str) -> CatalogResult<PokemonRecord> {
        self.client
            .fetch_entity(ResourceKind::Pokemon, &key.trim().to_lowercase())
            .await?
            .into_pokemon()
    }

    async fn resolve_listing(
        &self,
        kind: ResourceKind,
        listing: ListingPage,
    ) -> CatalogResult<Aggregate> {
        let names = listing.names();
        let records: Vec<CatalogRecord> = if names.is_empty() {
            Vec::new()
        } else {
            match Resolution::for_kind(kind) {
                Resolution::Entities(kind) => self
                    .fan_out
                    .fetch_many(kind, &names)
                    .await?
                    .into_iter()
                    .map(CatalogRecord::from)
                    .collect(),
                Resolution::Composite(link) => self
                    .assembler
                    .fetch_many_composite(&link, &names)
                    .await?
                    .into_iter()
                    .map(CatalogRecord::from)
                    .collect(),
            }
        };

        Ok(Aggregate {
            records,
            total_count: listing.total_count,
            has_next: listing.has_next,
        })
    }
}
