//! Composite assembler: resolves a primary entity, then the secondary it links to.

use tracing::{debug, instrument};

use super::fan_out::{ensure_non_empty, FanOutFetcher};
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{CompositeRecord, EntityRecord, ResourceKind};
use crate::domain::ports::CatalogClient;

/// Extracts the secondary entity's key from a resolved primary record.
pub type LinkResolver = fn(&EntityRecord) -> Option<String>;

/// How one composite family is linked: which field of the primary names
/// the secondary, and which family the secondary belongs to.
#[derive(Debug, Clone, Copy)]
pub struct CompositeLink {
    pub primary: ResourceKind,
    pub secondary: ResourceKind,
    resolve: LinkResolver,
}

impl CompositeLink {
    pub const fn new(primary: ResourceKind, secondary: ResourceKind, resolve: LinkResolver) -> Self {
        Self {
            primary,
            secondary,
            resolve,
        }
    }

    /// Berry → item, through the berry's `item.name` reference.
    pub const fn berry_item() -> Self {
        Self::new(ResourceKind::Berry, ResourceKind::Item, berry_item_key)
    }

    /// Key of the secondary entity; a primary without the reference is malformed.
    pub fn secondary_key(&self, primary: &EntityRecord) -> CatalogResult<String> {
        (self.resolve)(primary).ok_or_else(|| {
            CatalogError::malformed(
                self.primary,
                format!(
                    "{} '{}' carries no {} reference",
                    self.primary,
                    primary.name(),
                    self.secondary
                ),
            )
        })
    }
}

fn berry_item_key(record: &EntityRecord) -> Option<String> {
    record.as_berry().map(|berry| berry.item.name.clone())
}

/// Resolves batches of composite records.
///
/// The two hops for one element run in sequence; elements run concurrently
/// with each other under the same order and failure rules as
/// [`FanOutFetcher::fetch_many`].
pub struct CompositeAssembler<C: CatalogClient + ?Sized> {
    fan_out: FanOutFetcher<C>,
}

impl<C: CatalogClient + ?Sized> CompositeAssembler<C> {
    pub const fn new(fan_out: FanOutFetcher<C>) -> Self {
        Self { fan_out }
    }

    #[instrument(
        skip(self, link, identifiers),
        fields(primary = %link.primary, secondary = %link.secondary, batch = identifiers.len())
    )]
    pub async fn fetch_many_composite<S>(
        &self,
        link: &CompositeLink,
        identifiers: &[S],
    ) -> CatalogResult<Vec<CompositeRecord>>
    where
        S: AsRef<str> + Sync,
    {
        ensure_non_empty(identifiers)?;

        let records = self
            .fan_out
            .gather(identifiers.iter().map(|key| self.fetch_one(link, key.as_ref())))
            .await?;

        debug!(resolved = records.len(), "composite batch resolved");
        Ok(records)
    }

    async fn fetch_one(&self, link: &CompositeLink, key: &str) -> CatalogResult<CompositeRecord> {
        let client = self.fan_out.client();
        let primary = client.fetch_entity(link.primary, key).await?;
        let secondary_key = link.secondary_key(&primary)?;
        let secondary = client.fetch_entity(link.secondary, &secondary_key).await?;
        Ok(CompositeRecord { primary, secondary })
    }
}
