//! `lookup` command handler.

use skudb_core::{markdown, AppConfig, BatchLookupResult, RawValue};

/// Resolves `skus` and prints one line per input in the order given.
///
/// # Errors
///
/// Returns an error if a store query fails or the report cannot be written.
pub(crate) async fn run_lookup(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    skus: &[String],
    write_report: bool,
) -> anyhow::Result<()> {
    let raws: Vec<RawValue> = skus.iter().map(|s| RawValue::from(s.as_str())).collect();
    let batch = skudb_catalog::find_many_by_sku(pool, &raws, config.lookup_concurrency).await?;

    print_batch(&batch);

    if write_report {
        let path = crate::report::write_report(
            &config.report_dir,
            &markdown::render_lookup_report(&batch),
        )?;
        println!("report: {}", path.display());
    }

    Ok(())
}

fn print_batch(batch: &BatchLookupResult) {
    for result in &batch.results {
        match &result.product {
            Some(p) => println!(
                "{:<8} {} | {} | {} | {} | page {}",
                p.sku,
                p.product_name,
                p.color_variant,
                p.size_variant,
                markdown::format_price(p.unit_price),
                p.page.map_or_else(|| "-".to_string(), |n| n.to_string()),
            ),
            None => println!("{:<8} not found", result.sku),
        }
    }
    println!(
        "found {}/{} ({} not found)",
        batch.found_count, batch.total, batch.not_found_count
    );
}
