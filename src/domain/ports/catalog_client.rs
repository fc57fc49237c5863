use async_trait::async_trait;

use crate::domain::errors::CatalogResult;
use crate::domain::models::{EntityRecord, ListWindow, ListingPage, ResourceKind};

/// Single-entity access to the upstream catalog.
///
/// Implementations perform no caching. A missing entity must be reported as
/// [`CatalogError::NotFound`](crate::domain::errors::CatalogError::NotFound),
/// never folded into a generic upstream failure.
///
/// # Example
/// ```ignore
/// let record = client.fetch_entity(ResourceKind::Pokemon, "pikachu").await?;
/// let page = client.fetch_list(ResourceKind::Pokemon, ListWindow::new(20, 0)).await?;
/// ```
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the full record of one entity by name or numeric id.
    async fn fetch_entity(&self, kind: ResourceKind, key: &str) -> CatalogResult<EntityRecord>;

    /// Fetch one window of a listing endpoint.
    async fn fetch_list(&self, kind: ResourceKind, window: ListWindow)
        -> CatalogResult<ListingPage>;

    /// Probe whether an entity exists without transferring its body.
    ///
    /// `Ok(false)` only for a definite "absent" answer; any other failure is
    /// an error.
    async fn exists_entity(&self, kind: ResourceKind, name: &str) -> CatalogResult<bool>;
}
