//! Linked-item family: items (`/item`) and berries (`/berry`).

use serde::{Deserialize, Serialize};

use super::resource::NamedRef;

/// Full representation of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub sprites: ItemSprites,
}

impl ItemRecord {
    pub fn sprite_url(&self) -> Option<&str> {
        let sprite = self.sprites.default.as_deref().filter(|url| !url.is_empty());
        if sprite.is_none() {
            tracing::warn!(item_id = self.id, "missing item sprite");
        }
        sprite
    }

    /// First short effect description, if any.
    pub fn short_effect(&self) -> Option<&str> {
        self.effect_entries
            .first()
            .map(|entry| entry.short_effect.as_str())
    }
}

/// Description of what an item does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub effect: String,
    pub short_effect: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSprites {
    #[serde(default)]
    pub default: Option<String>,
}

/// A berry; its full representation lives on the linked item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerryRecord {
    pub id: u32,
    pub name: String,
    /// Reference to the item this berry is sold/held as
    pub item: NamedRef,
}
