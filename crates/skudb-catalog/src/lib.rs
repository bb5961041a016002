//! Catalog ingestion and SKU resolution on top of `skudb-db`.

pub mod catalogs;
pub mod error;
pub mod import;
pub mod lookup;
pub mod source;

pub use catalogs::{catalog_key, catalog_products};
pub use error::ImportError;
pub use import::{import_csv, import_csv_file, ImportRequest};
pub use lookup::{find_by_sku, find_many_by_sku};
pub use source::{parse_rows, SourceRow};
