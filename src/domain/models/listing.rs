//! Listing endpoint payloads: stubs and windowed pages.

use serde::{Deserialize, Serialize};

/// Minimal identity of a catalog entry as returned by a listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stub {
    /// Entry name, unique within a listing
    pub name: String,
    /// Reference to the full entity
    #[serde(rename = "url")]
    pub reference: String,
}

/// Raw listing envelope (`count`, `next`, `previous`, `results`).
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    pub results: Vec<Stub>,
}

/// A windowed view over the full catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    /// Authoritative number of entries in the whole catalog
    pub total_count: u64,
    /// Whether the upstream reported a following window
    pub has_next: bool,
    /// Stubs of this window, in upstream order
    pub stubs: Vec<Stub>,
}

impl ListingPage {
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Names of the stubs, in listing order.
    pub fn names(&self) -> Vec<String> {
        self.stubs.iter().map(|stub| stub.name.clone()).collect()
    }
}

impl From<ListEnvelope> for ListingPage {
    fn from(envelope: ListEnvelope) -> Self {
        Self {
            total_count: envelope.count,
            has_next: envelope.next.is_some(),
            stubs: envelope.results,
        }
    }
}

/// Limit/offset pair for a listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    /// `None` fetches the whole catalog
    pub limit: Option<u32>,
    pub offset: u64,
}

impl ListWindow {
    pub const fn new(limit: u32, offset: u64) -> Self {
        Self {
            limit: Some(limit),
            offset,
        }
    }

    /// Window covering the entire catalog.
    pub const fn all() -> Self {
        Self {
            limit: None,
            offset: 0,
        }
    }

    /// Query parameters as sent upstream; an unbounded window is `limit=-1`.
    pub fn query(&self) -> [(&'static str, String); 2] {
        let limit = self
            .limit
            .map_or_else(|| "-1".to_string(), |limit| limit.to_string());
        [("limit", limit), ("offset", self.offset.to_string())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_conversion() {
        let json = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        }"#;
        let envelope: ListEnvelope = serde_json::from_str(json).unwrap();
        let page = ListingPage::from(envelope);

        assert_eq!(page.total_count, 1302);
        assert!(page.has_next);
        assert_eq!(page.names(), vec!["bulbasaur", "ivysaur"]);
        assert_eq!(page.stubs[1].reference, "https://pokeapi.co/api/v2/pokemon/2/");
    }

    #[test]
    fn test_last_window_has_no_next() {
        let json = r#"{ "count": 64, "next": null, "previous": "x", "results": [] }"#;
        let page = ListingPage::from(serde_json::from_str::<ListEnvelope>(json).unwrap());
        assert!(!page.has_next);
        assert!(page.is_empty());
    }

    #[test]
    fn test_window_query() {
        assert_eq!(
            ListWindow::new(20, 40).query(),
            [("limit", "20".to_string()), ("offset", "40".to_string())]
        );
        assert_eq!(
            ListWindow::all().query(),
            [("limit", "-1".to_string()), ("offset", "0".to_string())]
        );
    }
}
