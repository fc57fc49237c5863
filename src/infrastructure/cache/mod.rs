//! In-memory aggregate store.
//!
//! Uses `moka` for TTL-based concurrent caching; each entry expires after the
//! TTL it was written with.

pub mod moka_store;

pub use moka_store::MokaAggregateStore;
