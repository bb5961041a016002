//! Markdown rendering for import and lookup reports.
//!
//! Pure functions over [`crate::report`] types; writing the result somewhere
//! is the caller's concern.

use std::fmt::Write as _;

use crate::report::{BatchLookupResult, ImportReport};

/// Renders an import report headed by the catalog it was imported into.
#[must_use]
pub fn render_import_report(report: &ImportReport, catalog_name: &str, campaign_code: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Import report: {catalog_name} / {campaign_code}");
    out.push('\n');
    let _ = writeln!(
        out,
        "- Catalog ID: {}{}",
        report.catalog_id,
        if report.catalog_created { " (new)" } else { "" }
    );
    let _ = writeln!(out, "- Rows processed: {}", report.rows_processed());
    let _ = writeln!(
        out,
        "- Succeeded: {} ({} new, {} updated)",
        report.success_count, report.inserted_count, report.updated_count
    );
    let _ = writeln!(out, "- Failed: {}", report.failure_count);

    if !report.errors.is_empty() {
        out.push_str("\n## Errors\n\n");
        out.push_str("| Row | Reason |\n|---:|---|\n");
        for error in &report.errors {
            let _ = writeln!(out, "| {} | {} |", error.row_number, escape_cell(&error.reason));
        }
    }

    out
}

/// Renders a batch lookup as a product table plus the list of misses.
#[must_use]
pub fn render_lookup_report(result: &BatchLookupResult) -> String {
    let mut out = String::from("# SKU lookup\n\n");
    let _ = writeln!(
        out,
        "Requested {}, found {}, not found {}.",
        result.total, result.found_count, result.not_found_count
    );

    if result.found_count > 0 {
        out.push_str("\n| SKU | Product | Color | Size | Price | Page |\n");
        out.push_str("|---|---|---|---|---:|---:|\n");
        for product in result.found_products() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} | {} |",
                product.sku,
                escape_cell(&product.product_name),
                escape_cell(&product.color_variant),
                escape_cell(&product.size_variant),
                format_price(product.unit_price),
                product.page.map_or_else(|| "-".to_string(), |p| p.to_string()),
            );
        }
    }

    if !result.not_found_skus.is_empty() {
        out.push_str("\n## Not found\n\n");
        for sku in &result.not_found_skus {
            let _ = writeln!(out, "- `{}`", sku.replace('`', "'"));
        }
    }

    out
}

/// Formats a price with thousands separators, e.g. `77990.0` → `$77,990`
/// and `1234.5` → `$1,234.50`.
#[must_use]
pub fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round();
    #[allow(clippy::cast_possible_truncation)]
    let cents = cents as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{fraction:02}")
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
