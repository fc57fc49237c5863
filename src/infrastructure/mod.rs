//! Infrastructure layer module
//!
//! This module contains all infrastructure adapters and external integrations:
//! - PokeAPI HTTP client (rate limiting, retry)
//! - Aggregate cache store (moka)
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod cache;
pub mod config;
pub mod logging;
pub mod pokeapi;
