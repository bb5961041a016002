//! Catalog import: CSV → validated rows → product upserts → [`ImportReport`].
//!
//! Row failures (validation or a rejected write) are recorded and skipped so
//! one bad line never discards the rest of the batch. Only a failure to
//! resolve the catalog, a malformed document, or an unreachable store abort
//! the run, and nothing already written is rolled back.

use std::path::Path;

use skudb_core::{validate_row, ImportReport};
use sqlx::SqlitePool;

use crate::catalogs::catalog_key;
use crate::source::{parse_rows, SourceRow};
use crate::ImportError;

/// Identifies the catalog edition a CSV belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub catalog_name: String,
    pub campaign_code: String,
    /// Applied only when the catalog is created by this import.
    pub description: Option<String>,
}

impl ImportRequest {
    pub fn new(catalog_name: impl Into<String>, campaign_code: impl Into<String>) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            campaign_code: campaign_code.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Imports a catalog CSV from a file on disk.
///
/// # Errors
///
/// Returns [`ImportError::Io`] if the file cannot be read, otherwise the
/// errors of [`import_csv`].
pub async fn import_csv_file(
    pool: &SqlitePool,
    path: &Path,
    request: &ImportRequest,
) -> Result<ImportReport, ImportError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_csv(pool, &bytes, request).await
}

/// Imports catalog CSV bytes under `request`'s catalog.
///
/// 1. Resolves (or creates) the catalog once.
/// 2. Parses the whole document.
/// 3. Validates and upserts each row in file order, numbering rows from 2.
///
/// # Errors
///
/// - [`ImportError::EmptyCatalogKey`] / [`ImportError::CatalogResolution`]
///   if the catalog cannot be resolved; no row is touched.
/// - [`ImportError::Parse`] / [`ImportError::FieldCount`] /
///   [`ImportError::MissingHeader`] for a malformed document; no row is
///   touched.
/// - [`ImportError::Storage`] if the store becomes unreachable mid-run.
pub async fn import_csv(
    pool: &SqlitePool,
    source: &[u8],
    request: &ImportRequest,
) -> Result<ImportReport, ImportError> {
    let (catalog_name, campaign_code) =
        catalog_key(&request.catalog_name, &request.campaign_code)
            .ok_or(ImportError::EmptyCatalogKey)?;

    let catalog = skudb_db::resolve_or_create_catalog(
        pool,
        catalog_name,
        campaign_code,
        request.description.as_deref(),
    )
    .await
    .map_err(|source| ImportError::CatalogResolution {
        catalog_name: catalog_name.to_string(),
        campaign_code: campaign_code.to_string(),
        source,
    })?;

    tracing::info!(
        catalog_id = catalog.id,
        created = catalog.created,
        catalog = %catalog_name,
        campaign = %campaign_code,
        "catalog resolved"
    );

    let rows = parse_rows(source)?;
    let mut report = ImportReport::new(catalog.id, catalog.created);

    for row in rows {
        import_row(pool, catalog.id, row, &mut report).await?;
    }

    tracing::info!(
        catalog_id = catalog.id,
        succeeded = report.success_count,
        inserted = report.inserted_count,
        updated = report.updated_count,
        failed = report.failure_count,
        "catalog import finished"
    );

    Ok(report)
}

async fn import_row(
    pool: &SqlitePool,
    catalog_id: i64,
    row: SourceRow,
    report: &mut ImportReport,
) -> Result<(), ImportError> {
    let SourceRow { row_number, raw } = row;

    let product = match validate_row(&raw) {
        Ok(validated) => validated.into_new_product(catalog_id),
        Err(e) => {
            tracing::warn!(row = row_number, error = %e, "validation failed, skipping row");
            report.record_failure(row_number, e.to_string());
            return Ok(());
        }
    };

    match skudb_db::upsert_product(pool, &product).await {
        Ok(outcome) => {
            tracing::debug!(
                row = row_number,
                sku = %product.sku,
                inserted = outcome.inserted,
                "row upserted"
            );
            report.record_success(outcome.inserted);
            Ok(())
        }
        Err(e) if e.is_unavailable() => Err(ImportError::Storage {
            row_number,
            source: e,
        }),
        Err(e) => {
            tracing::warn!(row = row_number, sku = %product.sku, error = %e, "upsert failed, skipping row");
            report.record_failure(row_number, format!("storage error: {e}"));
            Ok(())
        }
    }
}
