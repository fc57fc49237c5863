//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::ResourceKind;

#[derive(Parser)]
#[command(name = "pokecache")]
#[command(about = "Pokecache - cached, paginated views over the PokeAPI catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file to load instead of pokecache.yaml
    #[arg(short, long, global = true, env = "POKECACHE_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show one page of the pokedex
    Pokedex {
        /// Page number; missing, non-numeric or non-positive values mean page 1
        #[arg(short, long)]
        page: Option<String>,
    },

    /// Show one page of berries with their items
    Berries {
        /// Page number; missing, non-numeric or non-positive values mean page 1
        #[arg(short, long)]
        page: Option<String>,
    },

    /// Show the details of a single pokemon
    Pokemon {
        /// Pokemon name or numeric id
        key: String,
    },

    /// Search a whole catalog by name substring
    Search {
        /// Case-insensitive name fragment; empty lists everything
        #[arg(default_value = "")]
        term: String,

        /// Catalog to search (pokemon, berry, item, type)
        #[arg(short, long, default_value = "pokemon")]
        kind: ResourceKind,
    },

    /// Check whether a pokemon exists
    Exists {
        /// Pokemon name
        name: String,
    },

    /// Check whether a pokemon has the given type
    VerifyType {
        /// Pokemon name
        name: String,

        /// Type name, e.g. "fire"
        type_name: String,
    },

    /// List the types of a pokemon, or every type when no name is given
    Types {
        /// Pokemon name
        name: Option<String>,
    },

    /// Print the number of pokemon in the catalog
    Count,
}
