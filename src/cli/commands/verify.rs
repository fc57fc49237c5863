//! Yes/no checks and small lookups answered straight from the upstream.

use anyhow::Result;
use serde_json::json;

use crate::cli::output::print_json;
use crate::domain::ports::CatalogClient;
use crate::services::Verifier;

/// Handle exists command
pub async fn handle_exists<C>(verifier: &Verifier<C>, name: &str, json: bool) -> Result<()>
where
    C: CatalogClient + ?Sized,
{
    let exists = verifier.check_existence(name).await?;

    if json {
        print_json(&json!({ "name": name, "exists": exists }))
    } else {
        if exists {
            println!("{name} exists.");
        } else {
            println!("{name} does not exist.");
        }
        Ok(())
    }
}

/// Handle verify-type command
pub async fn handle_verify_type<C>(
    verifier: &Verifier<C>,
    name: &str,
    type_name: &str,
    json: bool,
) -> Result<()>
where
    C: CatalogClient + ?Sized,
{
    let matches = verifier.verify_type(name, type_name).await?;

    if json {
        print_json(&json!({ "name": name, "type": type_name, "matches": matches }))
    } else {
        if matches {
            println!("Yes, {name} is {type_name} type.");
        } else {
            println!("No, {name} is not {type_name} type.");
        }
        Ok(())
    }
}

/// Handle types command
pub async fn handle_types<C>(verifier: &Verifier<C>, name: Option<&str>, json: bool) -> Result<()>
where
    C: CatalogClient + ?Sized,
{
    let types = match name {
        Some(name) => verifier.pokemon_types(name).await?,
        None => verifier.all_types().await?,
    };

    if json {
        print_json(&types)
    } else {
        match name {
            Some(name) => println!("{name}: {}", types.join(", ")),
            None => println!("{}", types.join("\n")),
        }
        Ok(())
    }
}

/// Handle count command
pub async fn handle_count<C>(verifier: &Verifier<C>, json: bool) -> Result<()>
where
    C: CatalogClient + ?Sized,
{
    let count = verifier.pokemon_count().await?;

    if json {
        print_json(&json!({ "count": count }))
    } else {
        println!("There are {count} pokemon.");
        Ok(())
    }
}
