//! Row validation: narrows one raw catalog record into a [`ValidatedProduct`].
//!
//! Each column has exactly one narrowing function. They run in column order
//! and the first failure is returned; no storage is touched here.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::products::ValidatedProduct;
use crate::sku::{normalize_sku, Sku};
use crate::value::RawValue;

/// One record of the catalog CSV, keyed by column name, before validation.
///
/// `None` means the column was absent from the source entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductRow {
    pub sku: Option<RawValue>,
    pub product_name: Option<RawValue>,
    pub color_variant: Option<RawValue>,
    pub size_variant: Option<RawValue>,
    pub unit_price: Option<RawValue>,
    pub page: Option<RawValue>,
}

impl RawProductRow {
    /// Builds a row from `(column, value)` pairs. Unknown columns are ignored;
    /// column names are matched after trimming.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<RawValue>,
    {
        let mut row = Self::default();
        for (column, value) in pairs {
            let slot = match column.as_ref().trim() {
                "sku" => &mut row.sku,
                "product_name" => &mut row.product_name,
                "color_variant" => &mut row.color_variant,
                "size_variant" => &mut row.size_variant,
                "unit_price" => &mut row.unit_price,
                "page" => &mut row.page,
                _ => continue,
            };
            *slot = Some(value.into());
        }
        row
    }
}

/// Validates and coerces one raw record.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first column that fails to narrow.
pub fn validate_row(raw: &RawProductRow) -> Result<ValidatedProduct, ValidationError> {
    let sku = sku_field(raw.sku.as_ref())?;
    let product_name = required_text("product_name", raw.product_name.as_ref())?;
    let color_variant = required_text("color_variant", raw.color_variant.as_ref())?;
    let size_variant = required_text("size_variant", raw.size_variant.as_ref())?;
    let unit_price = price_field(raw.unit_price.as_ref())?;
    let page = page_field(raw.page.as_ref())?;

    Ok(ValidatedProduct {
        sku,
        product_name,
        color_variant,
        size_variant,
        unit_price,
        page,
    })
}

fn sku_field(value: Option<&RawValue>) -> Result<Sku, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field: "sku" })?;
    normalize_sku(value)
}

fn required_text(field: &'static str, value: Option<&RawValue>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field })?;
    let text = value.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn price_field(value: Option<&RawValue>) -> Result<f64, ValidationError> {
    const FIELD: &str = "unit_price";

    let value = value.ok_or(ValidationError::MissingField { field: FIELD })?;
    if value.is_blank() {
        return Err(ValidationError::EmptyField { field: FIELD });
    }
    let price = coerce_number(FIELD, value)?;
    if price <= 0.0 {
        return Err(ValidationError::NonPositivePrice { value: price });
    }
    Ok(price)
}

fn page_field(value: Option<&RawValue>) -> Result<Option<i64>, ValidationError> {
    const FIELD: &str = "page";

    let Some(value) = value.filter(|v| !v.is_blank()) else {
        return Ok(None);
    };
    let number = coerce_number(FIELD, value)?;
    if number.fract() != 0.0 || number.abs() > 9.0e15 {
        return Err(ValidationError::NotAnInteger {
            field: FIELD,
            value: value.to_string(),
        });
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(Some(number as i64))
}

/// Coerces text or a number into a finite `f64`.
fn coerce_number(field: &'static str, value: &RawValue) -> Result<f64, ValidationError> {
    let number = match value {
        #[allow(clippy::cast_precision_loss)]
        RawValue::Integer(n) => *n as f64,
        RawValue::Float(x) => *x,
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| ValidationError::NotANumber {
            field,
            value: s.trim().to_string(),
        })?,
    };
    if !number.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            value: value.to_string(),
        });
    }
    Ok(number)
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
