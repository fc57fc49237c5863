pub mod aggregate_cache;
pub mod catalog_service;
pub mod composite;
pub mod fan_out;
pub mod pagination;
pub mod presentation;
pub mod verifier;

pub use aggregate_cache::AggregateCache;
pub use catalog_service::{CacheTtls, CatalogService};
pub use composite::{CompositeAssembler, CompositeLink, LinkResolver};
pub use fan_out::FanOutFetcher;
pub use pagination::{PaginationPolicy, DEFAULT_PAGE_SIZE};
pub use presentation::{stat_percentage, title_case, MAX_BASE_STAT};
pub use verifier::Verifier;
