//! Existence and property checks used by the conversational front end.
//!
//! Built directly on the catalog client; nothing here is cached.

use std::sync::Arc;
use tracing::instrument;

use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{ListWindow, PokemonRecord, ResourceKind};
use crate::domain::ports::CatalogClient;

pub struct Verifier<C: CatalogClient + ?Sized> {
    client: Arc<C>,
}

impl<C: CatalogClient + ?Sized> Verifier<C> {
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Whether a pokemon exists, answered by a body-less probe.
    ///
    /// Transport failures are errors, never a silent `false`.
    #[instrument(skip(self))]
    pub async fn check_existence(&self, name: &str) -> CatalogResult<bool> {
        let name = normalize_name(name)?;
        self.client
            .exists_entity(ResourceKind::Pokemon, &name)
            .await
    }

    /// Whether `type_name` is one of the pokemon's classifications, ignoring case.
    ///
    /// A payload without a classification list surfaces as a malformed
    /// upstream error, distinct from transport failures.
    #[instrument(skip(self))]
    pub async fn verify_type(&self, name: &str, type_name: &str) -> CatalogResult<bool> {
        let pokemon = self.fetch_pokemon(name).await?;
        Ok(pokemon.has_type(type_name))
    }

    /// Classification names of a pokemon, in slot order.
    #[instrument(skip(self))]
    pub async fn pokemon_types(&self, name: &str) -> CatalogResult<Vec<String>> {
        Ok(self.fetch_pokemon(name).await?.type_names())
    }

    /// Names of every classification in the catalog.
    #[instrument(skip(self))]
    pub async fn all_types(&self) -> CatalogResult<Vec<String>> {
        let listing = self
            .client
            .fetch_list(ResourceKind::Type, ListWindow::all())
            .await?;
        Ok(listing.names())
    }

    /// Total number of pokemon, read from a one-entry listing window.
    #[instrument(skip(self))]
    pub async fn pokemon_count(&self) -> CatalogResult<u64> {
        let listing = self
            .client
            .fetch_list(ResourceKind::Pokemon, ListWindow::new(1, 0))
            .await?;
        Ok(listing.total_count)
    }

    async fn fetch_pokemon(&self, name: &str) -> CatalogResult<PokemonRecord> {
        let name = normalize_name(name)?;
        self.client
            .fetch_entity(ResourceKind::Pokemon, &name)
            .await?
            .into_pokemon()
    }
}

/// Upstream keys are lower-case.
fn normalize_name(name: &str) -> CatalogResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::ContractViolation(
            "pokemon name must not be empty".to_string(),
        ));
    }
    Ok(name.to_lowercase())
}
