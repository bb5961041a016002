use std::path::PathBuf;

use thiserror::Error;

/// A fatal import failure. Each variant names the stage that aborted the run;
/// rows committed before the failure stay committed.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog CSV: {0}")]
    Parse(#[source] csv::Error),

    #[error("catalog CSV has no header row")]
    MissingHeader,

    #[error("row {row_number} has {found} fields; the header has {expected}")]
    FieldCount {
        row_number: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to resolve catalog {catalog_name}/{campaign_code}: {source}")]
    CatalogResolution {
        catalog_name: String,
        campaign_code: String,
        #[source]
        source: skudb_db::DbError,
    },

    #[error("store unavailable while importing row {row_number}: {source}")]
    Storage {
        row_number: usize,
        #[source]
        source: skudb_db::DbError,
    },

    #[error("catalog name and campaign code must not be empty")]
    EmptyCatalogKey,
}

impl ImportError {
    /// Short machine-readable name of the failed stage.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            ImportError::Io { .. }
            | ImportError::Parse(_)
            | ImportError::MissingHeader
            | ImportError::FieldCount { .. } => "parse",
            ImportError::CatalogResolution { .. } | ImportError::EmptyCatalogKey => {
                "catalog_resolution"
            }
            ImportError::Storage { .. } => "storage",
        }
    }
}
