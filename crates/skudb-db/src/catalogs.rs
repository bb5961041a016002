//! Database operations for the `catalogs` table.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `catalogs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogRow {
    pub id: i64,
    pub catalog_name: String,
    pub campaign_code: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog with the number of products currently assigned to it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CatalogSummaryRow {
    pub id: i64,
    pub catalog_name: String,
    pub campaign_code: String,
    pub description: Option<String>,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Result of [`resolve_or_create_catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCatalog {
    pub id: i64,
    /// `true` if this call inserted the row.
    pub created: bool,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the id of the catalog identified by `(catalog_name, campaign_code)`,
/// creating it first if it does not exist.
///
/// The insert is conditional (`ON CONFLICT DO NOTHING`), so two callers racing
/// on the same pair both end up with the single surviving row. An existing
/// catalog is returned unchanged; `description` only applies on creation.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either statement fails, or
/// [`DbError::NotFound`] if the row disappears between the conflicting insert
/// and the follow-up read.
pub async fn resolve_or_create_catalog(
    pool: &SqlitePool,
    catalog_name: &str,
    campaign_code: &str,
    description: Option<&str>,
) -> Result<ResolvedCatalog, DbError> {
    let now = Utc::now();

    let inserted: Option<i64> = sqlx::query_scalar::<_, i64>(
        "INSERT INTO catalogs (catalog_name, campaign_code, description, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4) \
         ON CONFLICT (catalog_name, campaign_code) DO NOTHING \
         RETURNING id",
    )
    .bind(catalog_name)
    .bind(campaign_code)
    .bind(description)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    if let Some(id) = inserted {
        return Ok(ResolvedCatalog { id, created: true });
    }

    let existing = get_catalog_by_key(pool, catalog_name, campaign_code)
        .await?
        .ok_or(DbError::NotFound)?;

    Ok(ResolvedCatalog {
        id: existing.id,
        created: false,
    })
}

/// Returns the catalog with the exact `(catalog_name, campaign_code)` pair.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_catalog_by_key(
    pool: &SqlitePool,
    catalog_name: &str,
    campaign_code: &str,
) -> Result<Option<CatalogRow>, DbError> {
    let row = sqlx::query_as::<_, CatalogRow>(
        "SELECT id, catalog_name, campaign_code, description, created_at, updated_at \
         FROM catalogs \
         WHERE catalog_name = ?1 AND campaign_code = ?2",
    )
    .bind(catalog_name)
    .bind(campaign_code)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns a catalog by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_catalog(pool: &SqlitePool, id: i64) -> Result<Option<CatalogRow>, DbError> {
    let row = sqlx::query_as::<_, CatalogRow>(
        "SELECT id, catalog_name, campaign_code, description, created_at, updated_at \
         FROM catalogs \
         WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every catalog with its product count, ordered by name then campaign.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_catalogs(pool: &SqlitePool) -> Result<Vec<CatalogSummaryRow>, DbError> {
    let rows = sqlx::query_as::<_, CatalogSummaryRow>(
        "SELECT c.id, c.catalog_name, c.campaign_code, c.description, \
                COUNT(p.id) AS product_count, c.created_at \
         FROM catalogs c \
         LEFT JOIN products p ON p.catalog_id = c.id \
         GROUP BY c.id \
         ORDER BY c.catalog_name, c.campaign_code",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
