// ABOUTME: SQL scalar values and their literal rendering
// ABOUTME: Strings are single-quoted with embedded quotes doubled, NULL is bare

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::utils::quote_literal;

/// A scalar that can be rendered as an SQL literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Errors raised when a dynamic value has no SQL scalar form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported type for SQL formatting: {kind}")]
    UnsupportedValueType { kind: &'static str },
}

impl SqlValue {
    /// Plain text rendering used by the insert path, `None` for NULL.
    pub fn as_text(&self) -> Option<String> {
        match self {
            SqlValue::Null => None,
            SqlValue::Bool(b) => Some(b.to_string()),
            SqlValue::Int(i) => Some(i.to_string()),
            SqlValue::Float(f) => Some(f.to_string()),
            SqlValue::Text(s) => Some(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

/// Format a value as an SQL literal.
///
/// - strings are quoted, with every `'` doubled: `O'Reilly` becomes `'O''Reilly'`
/// - numbers and booleans render as-is: `123`, `true`
/// - NULL renders as `NULL`
///
/// # Examples
///
/// ```
/// use inventory_reconciler::sql::{format_sql_value, SqlValue};
/// assert_eq!(format_sql_value(&SqlValue::from("O'Reilly")), "'O''Reilly'");
/// assert_eq!(format_sql_value(&SqlValue::Int(123)), "123");
/// assert_eq!(format_sql_value(&SqlValue::Bool(true)), "true");
/// assert_eq!(format_sql_value(&SqlValue::Null), "NULL");
/// ```
pub fn format_sql_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Text(s) => quote_literal(s),
        SqlValue::Bool(b) => b.to_string(),
        SqlValue::Int(i) => i.to_string(),
        SqlValue::Float(f) => f.to_string(),
    }
}

/// Format an untyped JSON value, rejecting arrays and objects.
pub fn format_json_value(value: &serde_json::Value) -> Result<String, FormatError> {
    SqlValue::try_from(value).map(|v| format_sql_value(&v))
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_sql_value(self))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<f64> for SqlValue {
    /// NaN and infinities have no SQL literal and map to NULL.
    fn from(value: f64) -> Self {
        if value.is_finite() {
            SqlValue::Float(value)
        } else {
            SqlValue::Null
        }
    }
}

impl TryFrom<&serde_json::Value> for SqlValue {
    type Error = FormatError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match value {
            Value::Null => Ok(SqlValue::Null),
            Value::Bool(b) => Ok(SqlValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(SqlValue::Int(i)),
                None => Ok(n.as_f64().map(SqlValue::from).unwrap_or(SqlValue::Null)),
            },
            Value::String(s) => Ok(SqlValue::Text(s.clone())),
            Value::Array(_) => Err(FormatError::UnsupportedValueType { kind: "array" }),
            Value::Object(_) => Err(FormatError::UnsupportedValueType { kind: "object" }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_strings() {
        assert_eq!(format_sql_value(&SqlValue::from("O'Reilly")), "'O''Reilly'");
        assert_eq!(format_sql_value(&SqlValue::from("Data")), "'Data'");
        assert_eq!(format_sql_value(&SqlValue::from("")), "''");
    }

    #[test]
    fn test_format_non_strings() {
        assert_eq!(format_sql_value(&SqlValue::Int(123)), "123");
        assert_eq!(format_sql_value(&SqlValue::Float(10.0)), "10");
        assert_eq!(format_sql_value(&SqlValue::Float(0.25)), "0.25");
        assert_eq!(format_sql_value(&SqlValue::Bool(true)), "true");
        assert_eq!(format_sql_value(&SqlValue::Bool(false)), "false");
        assert_eq!(format_sql_value(&SqlValue::Null), "NULL");
    }

    #[test]
    fn test_quote_count_doubles() {
        for input in ["'", "a'b'c", "'''", "no quotes", "it's O'Brien's"] {
            let quotes_in = input.matches('\'').count();
            let formatted = format_sql_value(&SqlValue::from(input));
            assert!(formatted.starts_with('\'') && formatted.ends_with('\''));
            assert_eq!(formatted.matches('\'').count(), 2 * quotes_in + 2);
        }
    }

    #[test]
    fn test_literal_body_unescapes_to_original() {
        let original = "x' OR '1'='1";
        let formatted = format_sql_value(&SqlValue::from(original));
        let body = &formatted[1..formatted.len() - 1];
        assert_eq!(body.replace("''", "'"), original);
    }

    #[test]
    fn test_non_finite_floats_become_null() {
        assert_eq!(SqlValue::from(f64::NAN), SqlValue::Null);
        assert_eq!(SqlValue::from(f64::INFINITY), SqlValue::Null);
    }

    #[test]
    fn test_format_json_value() {
        assert_eq!(format_json_value(&json!("O'Reilly")).unwrap(), "'O''Reilly'");
        assert_eq!(format_json_value(&json!(123)).unwrap(), "123");
        assert_eq!(format_json_value(&json!(1.5)).unwrap(), "1.5");
        assert_eq!(format_json_value(&json!(true)).unwrap(), "true");
        assert_eq!(format_json_value(&json!(null)).unwrap(), "NULL");
    }

    #[test]
    fn test_format_json_value_rejects_composites() {
        assert_eq!(
            format_json_value(&json!([1, 2])),
            Err(FormatError::UnsupportedValueType { kind: "array" })
        );
        let err = format_json_value(&json!({"a": 1})).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported type for SQL formatting: object");
    }

    #[test]
    fn test_untagged_serde() {
        let values: Vec<SqlValue> = serde_json::from_str(r#"[null, true, 7, 1.5, "s"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SqlValue::Null,
                SqlValue::Bool(true),
                SqlValue::Int(7),
                SqlValue::Float(1.5),
                SqlValue::Text("s".to_string()),
            ]
        );
    }
}
