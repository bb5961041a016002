use std::{str::FromStr, time::Duration};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub mod catalogs;
pub mod products;

pub use catalogs::{
    get_catalog, get_catalog_by_key, list_catalogs, resolve_or_create_catalog, CatalogRow,
    CatalogSummaryRow, ResolvedCatalog,
};
pub use products::{
    count_products, get_product_by_sku, list_products_by_catalog, list_products_by_catalog_key,
    upsert_product, ProductRow, UpsertOutcome,
};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_MIN_CONNECTIONS: u32 = 1;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

// Path relative to crates/skudb-db/Cargo.toml; resolves to <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &skudb_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Primary SQLite result codes that mean the database file itself is
/// unusable: BUSY, LOCKED, READONLY, IOERR, CORRUPT, FULL, CANTOPEN, NOTADB.
/// BUSY and LOCKED only surface after the busy timeout has elapsed, so every
/// following write would hit the same lock.
const STORE_FAILURE_CODES: [i32; 8] = [5, 6, 8, 10, 11, 13, 14, 26];

impl DbError {
    /// `true` when the store itself cannot be reached, as opposed to a single
    /// statement being rejected. Callers processing many independent writes
    /// use this to decide between skipping a record and aborting the batch.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            DbError::Migration(_) => true,
            DbError::NotFound => false,
            DbError::Sqlx(sqlx::Error::Database(e)) => {
                e.code().is_some_and(|code| is_store_failure_code(&code))
            }
            DbError::Sqlx(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::WorkerCrashed
                    | sqlx::Error::Configuration(_)
            ),
        }
    }
}

/// SQLite reports extended result codes; the primary code is the low byte.
fn is_store_failure_code(code: &str) -> bool {
    code.parse::<i32>()
        .is_ok_and(|extended| STORE_FAILURE_CODES.contains(&(extended & 0xff)))
}

/// Connect to a SQLite pool using explicit URL and config.
///
/// The database file is created if it does not exist and foreign keys are
/// enforced on every connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the URL is invalid or the connection cannot be
/// established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await
}

/// Run all pending migrations against the pool.
///
/// Returns the number of migrations that were applied.
///
/// # Errors
///
/// Returns [`sqlx::migrate::MigrateError`] if any migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, sqlx::migrate::MigrateError> {
    // The _sqlx_migrations table does not exist on a fresh database; treat
    // absence as zero applied.
    let applied_before: i64 =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true")
            .fetch_one(pool)
            .await
            .unwrap_or(0);

    MIGRATOR.run(pool).await?;

    let applied_after: i64 =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = true")
            .fetch_one(pool)
            .await
            .unwrap_or(0);

    let delta = (applied_after - applied_before).max(0);
    Ok(usize::try_from(delta).unwrap_or(0))
}

/// Send a `SELECT 1` to verify the pool has a live connection.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// Run a full health check: ping the pool and return a typed error on failure.
///
/// # Errors
///
/// Returns [`DbError`] if the ping fails.
pub async fn health_check(pool: &SqlitePool) -> Result<(), DbError> {
    ping(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_config_has_sane_defaults() {
        let config = PoolConfig::default();

        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.min_connections, DEFAULT_MIN_CONNECTIONS);
        assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
    }

    #[test]
    fn pool_timeouts_count_as_unavailable() {
        assert!(DbError::Sqlx(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DbError::Sqlx(sqlx::Error::PoolClosed).is_unavailable());
    }

    #[test]
    fn store_level_result_codes_are_unavailable() {
        // FULL, IOERR_SHORT_READ (extended), READONLY, BUSY
        for code in ["13", "522", "8", "5"] {
            assert!(is_store_failure_code(code), "code {code}");
        }
    }

    #[test]
    fn constraint_result_codes_are_row_failures() {
        // CONSTRAINT, CONSTRAINT_FOREIGNKEY, CONSTRAINT_CHECK, non-numeric
        for code in ["19", "787", "275", "23505"] {
            assert!(!is_store_failure_code(code), "code {code}");
        }
        assert!(!is_store_failure_code("not-a-code"));
    }

    #[test]
    fn missing_rows_are_not_unavailability() {
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!DbError::NotFound.is_unavailable());
    }
}
