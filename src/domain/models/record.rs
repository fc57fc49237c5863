//! Typed entity records, composites, and the collection element type.

use serde::{Deserialize, Serialize};

use super::classification::TypeRecord;
use super::item::{BerryRecord, ItemRecord};
use super::pokemon::PokemonRecord;
use super::resource::ResourceKind;
use crate::domain::errors::{CatalogError, CatalogResult};

/// A fully resolved catalog entity, tagged by resource family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "lowercase")]
pub enum EntityRecord {
    Pokemon(PokemonRecord),
    Type(TypeRecord),
    Item(ItemRecord),
    Berry(BerryRecord),
}

impl EntityRecord {
    /// Decode an upstream body into the record shape of `kind`.
    ///
    /// Missing required fields are reported as a malformed payload rather than
    /// being carried further as an untyped map.
    pub fn decode(kind: ResourceKind, body: &[u8]) -> CatalogResult<Self> {
        let malformed = |err: serde_json::Error| CatalogError::malformed(kind, err.to_string());
        let record = match kind {
            ResourceKind::Pokemon => Self::Pokemon(serde_json::from_slice(body).map_err(malformed)?),
            ResourceKind::Type => Self::Type(serde_json::from_slice(body).map_err(malformed)?),
            ResourceKind::Item => Self::Item(serde_json::from_slice(body).map_err(malformed)?),
            ResourceKind::Berry => Self::Berry(serde_json::from_slice(body).map_err(malformed)?),
        };
        Ok(record)
    }

    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Pokemon(_) => ResourceKind::Pokemon,
            Self::Type(_) => ResourceKind::Type,
            Self::Item(_) => ResourceKind::Item,
            Self::Berry(_) => ResourceKind::Berry,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Pokemon(record) => &record.name,
            Self::Type(record) => &record.name,
            Self::Item(record) => &record.name,
            Self::Berry(record) => &record.name,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            Self::Pokemon(record) => record.id,
            Self::Type(record) => record.id,
            Self::Item(record) => record.id,
            Self::Berry(record) => record.id,
        }
    }

    pub const fn as_pokemon(&self) -> Option<&PokemonRecord> {
        match self {
            Self::Pokemon(record) => Some(record),
            _ => None,
        }
    }

    pub const fn as_berry(&self) -> Option<&BerryRecord> {
        match self {
            Self::Berry(record) => Some(record),
            _ => None,
        }
    }

    pub fn into_pokemon(self) -> CatalogResult<PokemonRecord> {
        match self {
            Self::Pokemon(record) => Ok(record),
            other => Err(unexpected_kind(ResourceKind::Pokemon, &other)),
        }
    }
}

fn unexpected_kind(expected: ResourceKind, actual: &EntityRecord) -> CatalogError {
    CatalogError::malformed(
        expected,
        format!("expected a {expected} record, got {}", actual.kind()),
    )
}

/// Two linked entities resolved together (e.g. a berry and its item).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeRecord {
    pub primary: EntityRecord,
    pub secondary: EntityRecord,
}

impl CompositeRecord {
    pub fn name(&self) -> &str {
        self.primary.name()
    }

    /// The berry/item pair, when this composite is one.
    pub const fn as_berry_item(&self) -> Option<(&BerryRecord, &ItemRecord)> {
        match (&self.primary, &self.secondary) {
            (EntityRecord::Berry(berry), EntityRecord::Item(item)) => Some((berry, item)),
            _ => None,
        }
    }
}

/// Element of a resolved collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogRecord {
    Composite(CompositeRecord),
    Entity(EntityRecord),
}

impl CatalogRecord {
    /// Name used for display and substring search.
    pub fn name(&self) -> &str {
        match self {
            Self::Entity(record) => record.name(),
            Self::Composite(record) => record.name(),
        }
    }
}

impl From<EntityRecord> for CatalogRecord {
    fn from(record: EntityRecord) -> Self {
        Self::Entity(record)
    }
}

impl From<CompositeRecord> for CatalogRecord {
    fn from(record: CompositeRecord) -> Self {
        Self::Composite(record)
    }
}
