//! Listing, detail and search commands.

use anyhow::Result;

use crate::cli::output::{print_json, TableFormatter};
use crate::domain::models::{PageOutcome, ResourceKind};
use crate::domain::ports::{AggregateStore, CatalogClient};
use crate::services::CatalogService;

/// Handle pokedex command
pub async fn handle_pokedex<C, S>(
    service: &CatalogService<C, S>,
    page: Option<String>,
    json: bool,
) -> Result<()>
where
    C: CatalogClient + ?Sized,
    S: AggregateStore + ?Sized,
{
    handle_listing(service, ResourceKind::Pokemon, page, json).await
}

/// Handle berries command
pub async fn handle_berries<C, S>(
    service: &CatalogService<C, S>,
    page: Option<String>,
    json: bool,
) -> Result<()>
where
    C: CatalogClient + ?Sized,
    S: AggregateStore + ?Sized,
{
    handle_listing(service, ResourceKind::Berry, page, json).await
}

/// Render one listing page. In human mode a redirect is followed once, the
/// way a browser would follow it; JSON mode prints the outcome as is.
async fn handle_listing<C, S>(
    service: &CatalogService<C, S>,
    kind: ResourceKind,
    page: Option<String>,
    json: bool,
) -> Result<()>
where
    C: CatalogClient + ?Sized,
    S: AggregateStore + ?Sized,
{
    let mut outcome = service.listing_page(kind, page.as_deref()).await?;

    if json {
        return print_json(&outcome);
    }

    if let PageOutcome::Redirect { page: target } = outcome {
        eprintln!("Page is out of range, showing page {target}.");
        outcome = service
            .listing_page(kind, Some(&target.to_string()))
            .await?;
    }

    let formatter = TableFormatter::new();
    match outcome {
        PageOutcome::Rendered(view) if kind == ResourceKind::Berry => {
            println!("{}", formatter.format_berries(&view));
        }
        PageOutcome::Rendered(view) => println!("{}", formatter.format_pokedex(&view)),
        PageOutcome::Redirect { page } => println!("Nothing to show; try page {page}."),
    }

    Ok(())
}

/// Handle pokemon command
pub async fn handle_pokemon<C, S>(service: &CatalogService<C, S>, key: &str, json: bool) -> Result<()>
where
    C: CatalogClient + ?Sized,
    S: AggregateStore + ?Sized,
{
    let pokemon = service.pokemon_detail(key).await?;

    if json {
        print_json(&pokemon)
    } else {
        println!("{}", TableFormatter::new().format_pokemon(&pokemon));
        Ok(())
    }
}

/// Handle search command
pub async fn handle_search<C, S>(
    service: &CatalogService<C, S>,
    kind: ResourceKind,
    term: &str,
    json: bool,
) -> Result<()>
where
    C: CatalogClient + ?Sized,
    S: AggregateStore + ?Sized,
{
    let records = service.search(kind, term).await?;

    if json {
        print_json(&records)
    } else {
        println!("{}", TableFormatter::new().format_records(&records));
        Ok(())
    }
}
