pub mod app_config;
pub mod config;
pub mod error;
pub mod markdown;
pub mod products;
pub mod report;
pub mod sku;
pub mod validate;
pub mod value;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, ValidationError};
pub use products::{NewProduct, Product, ValidatedProduct};
pub use report::{BatchLookupResult, ImportReport, LookupResult, RowError};
pub use sku::{normalize_sku, Sku, SKU_WIDTH};
pub use validate::{validate_row, RawProductRow};
pub use value::RawValue;
