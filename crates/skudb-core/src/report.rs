//! Plain result structures produced by the import pipeline and the lookup
//! service. Renderers (see [`crate::markdown`]) consume these without any
//! dependency on how they were produced.

use serde::{Deserialize, Serialize};

use crate::products::Product;

/// A single non-fatal row failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based display row number; the header is row 1.
    pub row_number: usize,
    pub reason: String,
}

/// Aggregate outcome of one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub catalog_id: i64,
    /// `true` if this run created the catalog record.
    pub catalog_created: bool,
    pub success_count: usize,
    /// Successful rows that created a new SKU.
    pub inserted_count: usize,
    /// Successful rows that overwrote an existing SKU.
    pub updated_count: usize,
    pub failure_count: usize,
    pub errors: Vec<RowError>,
}

impl ImportReport {
    #[must_use]
    pub fn new(catalog_id: i64, catalog_created: bool) -> Self {
        Self {
            catalog_id,
            catalog_created,
            ..Self::default()
        }
    }

    pub fn record_success(&mut self, inserted: bool) {
        self.success_count += 1;
        if inserted {
            self.inserted_count += 1;
        } else {
            self.updated_count += 1;
        }
    }

    pub fn record_failure(&mut self, row_number: usize, reason: impl Into<String>) {
        self.failure_count += 1;
        self.errors.push(RowError {
            row_number,
            reason: reason.into(),
        });
    }

    /// Total rows seen by the pipeline.
    #[must_use]
    pub fn rows_processed(&self) -> usize {
        self.success_count + self.failure_count
    }
}

/// Outcome of resolving one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    /// The SKU exactly as the caller supplied it.
    pub sku: String,
    /// Canonical form, or `None` when the input could not be normalized.
    pub normalized_sku: Option<String>,
    pub found: bool,
    pub product: Option<Product>,
}

impl LookupResult {
    #[must_use]
    pub fn not_found(sku: String, normalized_sku: Option<String>) -> Self {
        Self {
            sku,
            normalized_sku,
            found: false,
            product: None,
        }
    }
}

/// Outcome of resolving several SKUs, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchLookupResult {
    pub total: usize,
    pub found_count: usize,
    pub not_found_count: usize,
    pub results: Vec<LookupResult>,
    /// Inputs that did not resolve, in their original form.
    pub not_found_skus: Vec<String>,
}

impl BatchLookupResult {
    /// Aggregates per-SKU results, which must already be in input order.
    #[must_use]
    pub fn from_results(results: Vec<LookupResult>) -> Self {
        let not_found_skus: Vec<String> = results
            .iter()
            .filter(|r| !r.found)
            .map(|r| r.sku.clone())
            .collect();
        let total = results.len();
        let not_found_count = not_found_skus.len();

        Self {
            total,
            found_count: total - not_found_count,
            not_found_count,
            results,
            not_found_skus,
        }
    }

    /// Products that were found, in input order.
    pub fn found_products(&self) -> impl Iterator<Item = &Product> {
        self.results.iter().filter_map(|r| r.product.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_report_counts_inserts_and_updates() {
        let mut report = ImportReport::new(1, true);
        report.record_success(true);
        report.record_success(false);
        report.record_failure(4, "bad sku");

        assert_eq!(report.success_count, 2);
        assert_eq!(report.inserted_count, 1);
        assert_eq!(report.updated_count, 1);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.rows_processed(), 3);
        assert_eq!(
            report.errors,
            vec![RowError {
                row_number: 4,
                reason: "bad sku".to_string()
            }]
        );
    }

    #[test]
    fn batch_result_keeps_original_not_found_form() {
        let results = vec![
            LookupResult::not_found("22236".to_string(), Some("022236".to_string())),
            LookupResult::not_found("abc".to_string(), None),
        ];
        let batch = BatchLookupResult::from_results(results);

        assert_eq!(batch.total, 2);
        assert_eq!(batch.found_count, 0);
        assert_eq!(batch.not_found_count, 2);
        assert_eq!(batch.not_found_skus, vec!["22236", "abc"]);
        assert_eq!(batch.found_products().count(), 0);
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let batch = BatchLookupResult::from_results(vec![]);
        assert_eq!(batch.total, 0);
        assert_eq!(batch.found_count, 0);
        assert!(batch.not_found_skus.is_empty());
    }
}
