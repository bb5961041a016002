mod catalogs;
mod import;
mod lookup;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::catalogs::CatalogsCommands;

#[derive(Debug, Parser)]
#[command(name = "skudb-cli")]
#[command(about = "SKU catalog database command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Import a catalog CSV into the product store
    Import {
        /// Path to the CSV file
        #[arg(long)]
        file: PathBuf,
        /// Catalog name (e.g. leonisa)
        #[arg(long)]
        catalog: String,
        /// Campaign code (e.g. 172025)
        #[arg(long)]
        campaign: String,
        /// Description stored when the catalog is first created
        #[arg(long)]
        description: Option<String>,
        /// Also write a markdown report to the report directory
        #[arg(long)]
        report: bool,
    },
    /// Look up one or more SKUs
    Lookup {
        /// SKUs to resolve; short numeric codes are zero-padded
        #[arg(required = true)]
        skus: Vec<String>,
        /// Also write a markdown report to the report directory
        #[arg(long)]
        report: bool,
    },
    /// Inspect stored catalogs
    Catalogs {
        #[command(subcommand)]
        command: CatalogsCommands,
    },
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check that the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("skudb-cli: no command given (see --help)");
        return Ok(());
    };

    let config = skudb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = skudb_db::PoolConfig::from_app_config(&config);
    let pool = skudb_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            skudb_db::health_check(&pool).await?;
            println!("database ok");
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = skudb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Import {
            file,
            catalog,
            campaign,
            description,
            report,
        } => {
            skudb_db::run_migrations(&pool).await?;
            let mut request = skudb_catalog::ImportRequest::new(catalog, campaign);
            request.description = description;
            import::run_import(&pool, &config, &file, &request, report).await?;
        }
        Commands::Lookup { skus, report } => {
            skudb_db::run_migrations(&pool).await?;
            lookup::run_lookup(&pool, &config, &skus, report).await?;
        }
        Commands::Catalogs { command } => {
            skudb_db::run_migrations(&pool).await?;
            catalogs::run_catalogs(&pool, command).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
