use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// A single field of a catalog row failed to narrow into its typed form.
///
/// Always row-scoped: the import pipeline records it against the row number
/// and moves on to the next row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("SKU is empty")]
    EmptySku,

    #[error("SKU \"{value}\" must contain only digits")]
    SkuNotNumeric { value: String },

    #[error("SKU \"{value}\" has {len} digits; at most {max} are allowed")]
    SkuTooLong {
        value: String,
        len: usize,
        max: usize,
    },

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    #[error("field `{field}` is not a number: \"{value}\"")]
    NotANumber { field: &'static str, value: String },

    #[error("field `{field}` must be a whole number: \"{value}\"")]
    NotAnInteger { field: &'static str, value: String },

    #[error("unit_price must be positive, got {value}")]
    NonPositivePrice { value: f64 },
}
