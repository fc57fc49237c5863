//! Command-line interface
//!
//! Thin presentation layer over [`CatalogService`](crate::services::CatalogService)
//! and [`Verifier`](crate::services::Verifier).

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use serde_json::json;

use crate::domain::errors::CatalogError;

/// Message shown to the user for a failed command.
pub fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<CatalogError>() {
        Some(CatalogError::NotFound { kind, key }) => format!("{kind} {key} does not exist"),
        Some(catalog) if catalog.is_malformed() => {
            format!("unexpected response from the catalog service: {catalog}")
        }
        Some(CatalogError::Upstream(upstream)) => {
            format!("catalog service unavailable: {upstream}")
        }
        Some(CatalogError::ContractViolation(reason)) => format!("invalid request: {reason}"),
        None => format!("{err:#}"),
    }
}

/// Report `err` and exit with status 1.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    let message = error_message(&err);
    if json {
        println!("{}", json!({ "error": message }));
    } else {
        eprintln!("Error: {message}");
    }
    std::process::exit(1)
}
