//! Domain layer for the catalog aggregation layer
//!
//! This module contains the typed records, error kinds and port traits.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{CatalogError, CatalogResult, UpstreamError};
