//! Resource families exposed by the upstream catalog and their URL templates.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::errors::{CatalogError, CatalogResult};

/// A resource family of the upstream catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Primary entity (`/pokemon`)
    Pokemon,
    /// Classification (`/type`)
    Type,
    /// Linked-item entity (`/item`)
    Item,
    /// Berry, linked to an item (`/berry`)
    Berry,
}

impl ResourceKind {
    /// Path segment of this family under the API root.
    pub const fn segment(self) -> &'static str {
        match self {
            Self::Pokemon => "pokemon",
            Self::Type => "type",
            Self::Item => "item",
            Self::Berry => "berry",
        }
    }

    /// URL of a single entity, addressed by name or numeric id.
    ///
    /// The key is pushed as one percent-encoded path segment, so `#`, `?`
    /// and `/` stay part of the name. Keys that cannot name a segment
    /// (empty, `.` or `..`) address nothing and yield `NotFound`.
    pub fn entity_url(self, base_url: &str, key: &str) -> CatalogResult<Url> {
        if matches!(key, "" | "." | "..") {
            return Err(CatalogError::not_found(self, key));
        }
        let mut url = self.list_url(base_url)?;
        append_segments(&mut url, base_url, &[key])?;
        Ok(url)
    }

    /// URL of the listing endpoint, without query parameters.
    pub fn list_url(self, base_url: &str) -> CatalogResult<Url> {
        let mut url = Url::parse(base_url).map_err(|err| {
            CatalogError::ContractViolation(format!("invalid base url {base_url}: {err}"))
        })?;
        append_segments(&mut url, base_url, &[self.segment(), ""])?;
        Ok(url)
    }
}

/// Drop a trailing empty segment from `url`, then push each segment
/// percent-encoded.
fn append_segments(url: &mut Url, base_url: &str, segments: &[&str]) -> CatalogResult<()> {
    url.path_segments_mut()
        .map_err(|()| {
            CatalogError::ContractViolation(format!("base url cannot carry a path: {base_url}"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

/// A `{name, url}` reference embedded inside an entity payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
    pub url: String,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pokemon" => Ok(Self::Pokemon),
            "type" => Ok(Self::Type),
            "item" => Ok(Self::Item),
            "berry" | "berries" => Ok(Self::Berry),
            other => Err(format!("unknown resource kind: {other}")),
        }
    }
}
