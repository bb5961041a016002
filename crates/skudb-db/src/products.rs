//! Database operations for the `products` table.

use chrono::{DateTime, Utc};
use skudb_core::{NewProduct, Product, Sku};
use sqlx::SqlitePool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `products` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    /// Canonical six-digit SKU; unique across every catalog.
    pub sku: String,
    pub catalog_id: i64,
    pub product_name: String,
    pub color_variant: String,
    pub size_variant: String,
    pub unit_price: f64,
    pub page: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            sku: row.sku,
            catalog_id: row.catalog_id,
            product_name: row.product_name,
            color_variant: row.color_variant,
            size_variant: row.size_variant,
            unit_price: row.unit_price,
            page: row.page,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Result of [`upsert_product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub id: i64,
    /// `true` for the insert branch, `false` when an existing SKU was overwritten.
    pub inserted: bool,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Upserts a product keyed by SKU.
///
/// Conflicts on `sku` overwrite `catalog_id`, `product_name`,
/// `color_variant`, `size_variant`, `unit_price`, `page`, and `updated_at`.
/// Re-importing a SKU under another catalog therefore moves it to that
/// catalog. `created_at` is never touched on the update branch, which is how
/// the returned `inserted` flag is derived.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails (e.g. the referenced
/// catalog does not exist).
pub async fn upsert_product(pool: &SqlitePool, product: &NewProduct) -> Result<UpsertOutcome, DbError> {
    let now = Utc::now();

    let (id, inserted): (i64, bool) = sqlx::query_as::<_, (i64, bool)>(
        "INSERT INTO products \
             (sku, catalog_id, product_name, color_variant, size_variant, unit_price, page, \
              created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) \
         ON CONFLICT (sku) DO UPDATE SET \
             catalog_id    = excluded.catalog_id, \
             product_name  = excluded.product_name, \
             color_variant = excluded.color_variant, \
             size_variant  = excluded.size_variant, \
             unit_price    = excluded.unit_price, \
             page          = excluded.page, \
             updated_at    = excluded.updated_at \
         RETURNING id, created_at = updated_at",
    )
    .bind(product.sku.as_str())
    .bind(product.catalog_id)
    .bind(&product.product_name)
    .bind(&product.color_variant)
    .bind(&product.size_variant)
    .bind(product.unit_price)
    .bind(product.page)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(UpsertOutcome { id, inserted })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns the product with exactly this SKU, if any.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_product_by_sku(pool: &SqlitePool, sku: &Sku) -> Result<Option<ProductRow>, DbError> {
    let row = sqlx::query_as::<_, ProductRow>(
        "SELECT id, sku, catalog_id, product_name, color_variant, size_variant, \
                unit_price, page, created_at, updated_at \
         FROM products \
         WHERE sku = ?1",
    )
    .bind(sku.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every product currently assigned to `catalog_id`, ordered by SKU.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products_by_catalog(
    pool: &SqlitePool,
    catalog_id: i64,
) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT id, sku, catalog_id, product_name, color_variant, size_variant, \
                unit_price, page, created_at, updated_at \
         FROM products \
         WHERE catalog_id = ?1 \
         ORDER BY sku",
    )
    .bind(catalog_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the products of the catalog identified by `(catalog_name,
/// campaign_code)`; empty when no such catalog exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_products_by_catalog_key(
    pool: &SqlitePool,
    catalog_name: &str,
    campaign_code: &str,
) -> Result<Vec<ProductRow>, DbError> {
    let rows = sqlx::query_as::<_, ProductRow>(
        "SELECT p.id, p.sku, p.catalog_id, p.product_name, p.color_variant, p.size_variant, \
                p.unit_price, p.page, p.created_at, p.updated_at \
         FROM products p \
         JOIN catalogs c ON c.id = p.catalog_id \
         WHERE c.catalog_name = ?1 AND c.campaign_code = ?2 \
         ORDER BY p.sku",
    )
    .bind(catalog_name)
    .bind(campaign_code)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the total number of stored products.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_products(pool: &SqlitePool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
