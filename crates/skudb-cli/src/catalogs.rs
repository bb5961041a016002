//! `catalogs` command handlers: read-only views of the catalog registry.

use clap::Subcommand;
use skudb_core::markdown::format_price;

/// Sub-commands available under `catalogs`.
#[derive(Debug, Subcommand)]
pub enum CatalogsCommands {
    /// List every catalog with its product count
    List,
    /// List the products currently assigned to one catalog
    Products {
        /// Catalog name (e.g. leonisa)
        #[arg(long)]
        catalog: String,
        /// Campaign code (e.g. 172025)
        #[arg(long)]
        campaign: String,
    },
}

/// Dispatches a `catalogs` sub-command.
///
/// # Errors
///
/// Returns an error if a query fails or the requested catalog does not exist.
pub(crate) async fn run_catalogs(
    pool: &sqlx::SqlitePool,
    command: CatalogsCommands,
) -> anyhow::Result<()> {
    match command {
        CatalogsCommands::List => run_catalogs_list(pool).await,
        CatalogsCommands::Products { catalog, campaign } => {
            run_catalog_products(pool, &catalog, &campaign).await
        }
    }
}

async fn run_catalogs_list(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let catalogs = skudb_db::list_catalogs(pool).await?;
    if catalogs.is_empty() {
        println!("no catalogs imported yet");
        return Ok(());
    }

    println!("{:<6}{:<20}{:<12}{:>10}", "ID", "CATALOG", "CAMPAIGN", "PRODUCTS");
    for c in &catalogs {
        println!(
            "{:<6}{:<20}{:<12}{:>10}",
            c.id, c.catalog_name, c.campaign_code, c.product_count
        );
    }
    Ok(())
}

async fn run_catalog_products(
    pool: &sqlx::SqlitePool,
    catalog: &str,
    campaign: &str,
) -> anyhow::Result<()> {
    let Some(products) = skudb_catalog::catalog_products(pool, catalog, campaign).await? else {
        anyhow::bail!(
            "catalog '{}' with campaign '{}' not found",
            catalog.trim(),
            campaign.trim()
        );
    };

    for p in &products {
        println!(
            "{:<8}{} | {} | {} | {}",
            p.sku,
            p.product_name,
            p.color_variant,
            p.size_variant,
            format_price(p.unit_price)
        );
    }
    println!("{} product(s)", products.len());
    Ok(())
}
