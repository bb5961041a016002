//! Canonical SKU normalization shared by the import and lookup paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::RawValue;

/// Width of a canonical SKU.
pub const SKU_WIDTH: usize = 6;

/// A canonical SKU: exactly [`SKU_WIDTH`] ASCII digits, zero-padded on the left.
///
/// The only way to build one is through [`normalize_sku`] (or `FromStr`), so a
/// `Sku` in hand is always a valid storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Sku {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize_digits(s.trim())
    }
}

/// Normalizes a raw SKU value into its canonical six-digit form.
///
/// `"19976"`, `"019976"`, `" 19976 "` and the number `19976` all produce
/// `Sku("019976")`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptySku`] for blank input,
/// [`ValidationError::SkuNotNumeric`] if any character is not an ASCII digit,
/// and [`ValidationError::SkuTooLong`] for more than [`SKU_WIDTH`] digits.
pub fn normalize_sku(raw: &RawValue) -> Result<Sku, ValidationError> {
    let text = raw.to_string();
    normalize_digits(text.trim())
}

fn normalize_digits(digits: &str) -> Result<Sku, ValidationError> {
    if digits.is_empty() {
        return Err(ValidationError::EmptySku);
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::SkuNotNumeric {
            value: digits.to_string(),
        });
    }
    if digits.len() > SKU_WIDTH {
        return Err(ValidationError::SkuTooLong {
            value: digits.to_string(),
            len: digits.len(),
            max: SKU_WIDTH,
        });
    }
    Ok(Sku(format!("{digits:0>SKU_WIDTH$}")))
}

#[cfg(test)]
#[path = "sku_test.rs"]
mod tests;
