use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sku::Sku;

/// A catalog row that passed validation but is not yet bound to a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedProduct {
    pub sku: Sku,
    pub product_name: String,
    pub color_variant: String,
    pub size_variant: String,
    pub unit_price: f64,
    /// Page of the printed catalog the product appears on.
    pub page: Option<i64>,
}

impl ValidatedProduct {
    /// Binds the validated row to the catalog it is being imported into.
    #[must_use]
    pub fn into_new_product(self, catalog_id: i64) -> NewProduct {
        NewProduct {
            sku: self.sku,
            catalog_id,
            product_name: self.product_name,
            color_variant: self.color_variant,
            size_variant: self.size_variant,
            unit_price: self.unit_price,
            page: self.page,
        }
    }
}

/// Everything the product store needs to upsert one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: Sku,
    pub catalog_id: i64,
    pub product_name: String,
    pub color_variant: String,
    pub size_variant: String,
    pub unit_price: f64,
    pub page: Option<i64>,
}

/// A stored product as handed to lookup callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// Canonical six-digit SKU.
    pub sku: String,
    pub catalog_id: i64,
    pub product_name: String,
    pub color_variant: String,
    pub size_variant: String,
    pub unit_price: f64,
    pub page: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
