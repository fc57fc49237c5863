//! Pokecache CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use pokecache::cli::commands::{catalog, verify};
use pokecache::cli::{Cli, Commands};
use pokecache::domain::models::Config;
use pokecache::infrastructure::cache::MokaAggregateStore;
use pokecache::infrastructure::config::ConfigLoader;
use pokecache::infrastructure::logging::LoggerImpl;
use pokecache::infrastructure::pokeapi::{PokeApiClient, PokeApiClientConfig};
use pokecache::services::{CatalogService, Verifier};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        pokecache::cli::handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&config.logging)?;

    let client = Arc::new(PokeApiClient::with_config(PokeApiClientConfig::from(&config))?);

    match cli.command {
        Commands::Pokedex { page } => {
            catalog::handle_pokedex(&catalog_service(client, &config), page, cli.json).await
        }
        Commands::Berries { page } => {
            catalog::handle_berries(&catalog_service(client, &config), page, cli.json).await
        }
        Commands::Pokemon { key } => {
            catalog::handle_pokemon(&catalog_service(client, &config), &key, cli.json).await
        }
        Commands::Search { term, kind } => {
            catalog::handle_search(&catalog_service(client, &config), kind, &term, cli.json).await
        }
        Commands::Exists { name } => {
            verify::handle_exists(&Verifier::new(client), &name, cli.json).await
        }
        Commands::VerifyType { name, type_name } => {
            verify::handle_verify_type(&Verifier::new(client), &name, &type_name, cli.json).await
        }
        Commands::Types { name } => {
            verify::handle_types(&Verifier::new(client), name.as_deref(), cli.json).await
        }
        Commands::Count => verify::handle_count(&Verifier::new(client), cli.json).await,
    }
}

fn catalog_service(
    client: Arc<PokeApiClient>,
    config: &Config,
) -> CatalogService<PokeApiClient, MokaAggregateStore> {
    let store = Arc::new(MokaAggregateStore::with_capacity(config.cache.max_capacity));
    CatalogService::from_config(client, store, config)
}
