//! Primary entity record (`/pokemon/{name|id}`).

use serde::{Deserialize, Serialize};

use super::resource::NamedRef;

/// Full representation of a pokemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    /// Sort ordinal used by the upstream (may be `-1` for alternate forms)
    pub order: i32,
    #[serde(default)]
    pub sprites: PokemonSprites,
    pub stats: Vec<StatSlot>,
    pub types: Vec<TypeSlot>,
}

impl PokemonRecord {
    /// Classification names in slot order.
    pub fn type_names(&self) -> Vec<String> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|slot| slot.slot);
        slots.into_iter().map(|slot| slot.kind.name.clone()).collect()
    }

    /// Case-insensitive classification membership.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.types
            .iter()
            .any(|slot| slot.kind.name.eq_ignore_ascii_case(type_name.trim()))
    }

    /// Official artwork, falling back to nothing when the upstream omits it.
    pub fn artwork_url(&self) -> Option<&str> {
        let artwork = self
            .sprites
            .other
            .as_ref()
            .and_then(|other| other.official_artwork.as_ref())
            .and_then(|artwork| artwork.front_default.as_deref())
            .filter(|url| !url.is_empty());

        if artwork.is_none() {
            tracing::warn!(pokemon_id = self.id, "missing official artwork sprite");
        }
        artwork
    }

    pub fn base_stat(&self, stat_name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|slot| slot.stat.name == stat_name)
            .map(|slot| slot.base_stat)
    }
}

/// One base stat of a pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedRef,
}

/// One typed classification slot of a pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedRef,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}
