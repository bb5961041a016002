//! Catalog key handling shared by the import and read paths.

use skudb_db::ProductRow;
use sqlx::SqlitePool;

/// Trims a `(catalog_name, campaign_code)` pair the way it is stored.
/// Returns `None` if either part is blank.
#[must_use]
pub fn catalog_key<'a>(
    catalog_name: &'a str,
    campaign_code: &'a str,
) -> Option<(&'a str, &'a str)> {
    let name = catalog_name.trim();
    let campaign = campaign_code.trim();
    (!name.is_empty() && !campaign.is_empty()).then_some((name, campaign))
}

/// Lists the products currently assigned to a catalog, ordered by SKU.
///
/// The key is trimmed like an import key. Returns `None` when no such
/// catalog exists, and `Some(vec![])` for a catalog with no products.
///
/// # Errors
///
/// Returns [`skudb_db::DbError`] if a query fails.
pub async fn catalog_products(
    pool: &SqlitePool,
    catalog_name: &str,
    campaign_code: &str,
) -> Result<Option<Vec<ProductRow>>, skudb_db::DbError> {
    let Some((name, campaign)) = catalog_key(catalog_name, campaign_code) else {
        return Ok(None);
    };

    let Some(catalog) = skudb_db::get_catalog_by_key(pool, name, campaign).await? else {
        return Ok(None);
    };

    skudb_db::list_products_by_catalog(pool, catalog.id)
        .await
        .map(Some)
}
