//! Loosely-typed cell values as they arrive from CSV files or tool calls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw value before field-specific narrowing.
///
/// CSV cells always arrive as [`RawValue::Text`]; JSON callers (the agent tool
/// endpoint) may send bare numbers, which deserialize into the numeric arms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Returns the trimmed text content, or `None` for numeric values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(s) => Some(s.trim()),
            RawValue::Integer(_) | RawValue::Float(_) => None,
        }
    }

    /// `true` for text that is empty after trimming. Numbers are never blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.as_text().is_some_and(str::is_empty)
    }
}

// Integral floats print without a fractional part so that `19976.0` and
// `19976` share the same string form.
impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(n) => write!(f, "{n}"),
            RawValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e15 => {
                write!(f, "{x:.0}")
            }
            RawValue::Float(x) => write!(f, "{x}"),
            RawValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_integral_float_without_fraction() {
        assert_eq!(RawValue::Float(19976.0).to_string(), "19976");
        assert_eq!(RawValue::Float(12.5).to_string(), "12.5");
    }

    #[test]
    fn display_keeps_text_verbatim() {
        assert_eq!(RawValue::from(" 019976 ").to_string(), " 019976 ");
    }

    #[test]
    fn blank_only_applies_to_text() {
        assert!(RawValue::from("   ").is_blank());
        assert!(!RawValue::from("x").is_blank());
        assert!(!RawValue::Integer(0).is_blank());
    }

    #[test]
    fn deserializes_json_numbers_and_strings() {
        let values: Vec<RawValue> =
            serde_json::from_str(r#"[19976, "022236", 9241.0]"#).expect("valid json");
        assert_eq!(
            values,
            vec![
                RawValue::Integer(19976),
                RawValue::Text("022236".to_string()),
                RawValue::Float(9241.0),
            ]
        );
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&RawValue::Integer(7)).expect("serialize");
        assert_eq!(json, "7");
    }
}
