//! SKU lookup: the read path exposed to the agent tool layer.
//!
//! Inputs are free text relayed from user messages, so anything that fails
//! normalization is reported as "not found" instead of an error.

use futures::stream::{self, StreamExt, TryStreamExt};
use skudb_core::{normalize_sku, BatchLookupResult, LookupResult, Product, RawValue};
use sqlx::SqlitePool;

/// Resolves one raw SKU.
///
/// # Errors
///
/// Returns [`skudb_db::DbError`] only if the store query fails; malformed
/// input yields `found: false`.
pub async fn find_by_sku(
    pool: &SqlitePool,
    raw: &RawValue,
) -> Result<LookupResult, skudb_db::DbError> {
    let input = raw.to_string();

    let sku = match normalize_sku(raw) {
        Ok(sku) => sku,
        Err(e) => {
            tracing::debug!(sku = %input, reason = %e, "lookup input is not a valid SKU");
            return Ok(LookupResult::not_found(input, None));
        }
    };

    let row = skudb_db::get_product_by_sku(pool, &sku).await?;
    tracing::debug!(sku = %sku, found = row.is_some(), "sku lookup");

    Ok(match row {
        Some(row) => LookupResult {
            sku: input,
            normalized_sku: Some(sku.into_inner()),
            found: true,
            product: Some(Product::from(row)),
        },
        None => LookupResult::not_found(input, Some(sku.into_inner())),
    })
}

/// Resolves several raw SKUs independently.
///
/// Up to `concurrency` lookups are in flight at once (at least one); results
/// come back in input order regardless of completion order.
///
/// # Errors
///
/// Returns the first [`skudb_db::DbError`] raised by any lookup.
pub async fn find_many_by_sku(
    pool: &SqlitePool,
    raws: &[RawValue],
    concurrency: usize,
) -> Result<BatchLookupResult, skudb_db::DbError> {
    let lookups: Vec<_> = raws.iter().map(|raw| find_by_sku(pool, raw)).collect();
    let results: Vec<LookupResult> = stream::iter(lookups)
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    let batch = BatchLookupResult::from_results(results);
    tracing::info!(
        total = batch.total,
        found = batch.found_count,
        not_found = batch.not_found_count,
        "batch sku lookup"
    );
    Ok(batch)
}
