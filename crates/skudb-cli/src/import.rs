//! `import` command handler.
//!
//! A fatal import error is returned to `main`, which exits non-zero. Row
//! failures are part of a successful run and only printed.

use std::path::Path;

use skudb_catalog::ImportRequest;
use skudb_core::{markdown::render_import_report, AppConfig, ImportReport};

/// Imports `file` into the catalog named by `request` and prints a summary.
///
/// # Errors
///
/// Returns an error if the import aborts or the report cannot be written.
pub(crate) async fn run_import(
    pool: &sqlx::SqlitePool,
    config: &AppConfig,
    file: &Path,
    request: &ImportRequest,
    write_report: bool,
) -> anyhow::Result<()> {
    let report = match skudb_catalog::import_csv_file(pool, file, request).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(stage = e.stage(), error = %e, "import aborted");
            return Err(e.into());
        }
    };

    print_summary(&report, request);

    if write_report {
        let markdown = render_import_report(&report, &request.catalog_name, &request.campaign_code);
        let path = crate::report::write_report(&config.report_dir, &markdown)?;
        println!("report: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &ImportReport, request: &ImportRequest) {
    let created = if report.catalog_created { " (new)" } else { "" };
    println!(
        "catalog {}/{} id={}{created}",
        request.catalog_name, request.campaign_code, report.catalog_id
    );
    println!(
        "succeeded: {} ({} new, {} updated)",
        report.success_count, report.inserted_count, report.updated_count
    );
    println!("failed:    {}", report.failure_count);
    for error in &report.errors {
        println!("  row {:>5}  {}", error.row_number, error.reason);
    }
}
