pub mod aggregate;
pub mod classification;
pub mod config;
pub mod item;
pub mod listing;
pub mod page;
pub mod pokemon;
pub mod record;
pub mod resource;

pub use aggregate::{Aggregate, CachedAggregate};
pub use classification::{TypeMember, TypeRecord};
pub use config::{
    CacheConfig, Config, FanOutConfig, LoggingConfig, PaginationConfig, RateLimitConfig,
    RetryConfig, UpstreamConfig,
};
pub use item::{BerryRecord, EffectEntry, ItemRecord, ItemSprites};
pub use listing::{ListWindow, ListingPage, Stub};
pub use page::{PageOutcome, PageView};
pub use pokemon::{PokemonRecord, PokemonSprites, StatSlot, TypeSlot};
pub use record::{CatalogRecord, CompositeRecord, EntityRecord};
pub use resource::{NamedRef, ResourceKind};
