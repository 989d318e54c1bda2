//! Core value types for template expressions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::ValueType;

/// Core value type for template expressions
///
/// This enum represents every value that can flow through the engine:
/// expression results, data-context roots, iteration items and expanded
/// template trees all share this representation. Objects preserve key
/// insertion order so that expansion round-trips templates byte-stably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value, also the result of resolving a missing property
    Null,

    /// Boolean value
    Boolean(bool),

    /// Number value; the language has a single double-precision number type
    Number(f64),

    /// String value
    String(String),

    /// Ordered list of values
    List(Vec<Value>),

    /// String-keyed object with stable key order
    Object(IndexMap<String, Value>),
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Create a number value
    pub fn number(n: f64) -> Self {
        Self::Number(n)
    }

    /// Create an empty object value
    pub fn empty_object() -> Self {
        Self::Object(IndexMap::new())
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Truthiness following the template language rules: booleans as-is,
    /// numbers truthy except zero, strings truthy except empty, null falsy,
    /// lists and objects truthy unless empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Object(map) => !map.is_empty(),
        }
    }

    /// Numeric view of the value. Numbers convert as-is; strings convert
    /// when they parse as a number. This is the only numeric coercion the
    /// engine defines; everything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Get the string slice if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the list slice if this is a list value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the object map if this is an object value
    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a property on an object value
    pub fn get_property(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(name),
            _ => None,
        }
    }

    /// Render the value the way template output embeds it: integral numbers
    /// without a trailing `.0`, booleans as `true`/`false`, null as the
    /// empty string, strings as-is, lists and objects as compact JSON.
    pub fn to_output_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Boolean(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
            Self::String(s) => s.clone(),
            Self::List(_) | Self::Object(_) => {
                serde_json::to_string(self).unwrap_or_default()
            }
        }
    }

    /// Get the runtime type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::List(_) => ValueType::List,
            Self::Object(_) => ValueType::Object,
        }
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Boolean(_) => "Boolean",
            Self::Number(_) => "Number",
            Self::String(_) => "String",
            Self::List(_) => "List",
            Self::Object(_) => "Object",
        }
    }
}

/// Format a number for template output, dropping the fractional part when
/// the value is integral.
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_output_string())
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Boolean(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(b),
            Value::Number(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::Number(-1.5).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("x").is_truthy());
        assert!(!Value::List(vec![]).is_truthy());
        assert!(Value::List(vec![Value::Null]).is_truthy());
    }

    #[test]
    fn test_output_string_drops_integral_fraction() {
        assert_eq!(Value::Number(42.0).to_output_string(), "42");
        assert_eq!(Value::Number(-3.0).to_output_string(), "-3");
        assert_eq!(Value::Number(2.5).to_output_string(), "2.5");
        assert_eq!(Value::Boolean(true).to_output_string(), "true");
        assert_eq!(Value::Null.to_output_string(), "");
        assert_eq!(Value::string("as-is").to_output_string(), "as-is");
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Number(3.5).as_number(), Some(3.5));
        assert_eq!(Value::string("12").as_number(), Some(12.0));
        assert_eq!(Value::string(" 2.5 ").as_number(), Some(2.5));
        assert_eq!(Value::string("twelve").as_number(), None);
        assert_eq!(Value::Boolean(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_json_round_trip_preserves_key_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": {"b": [1, 2], "a": null}}));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);

        // Numbers come back as f64, so compare against float literals
        let back: serde_json::Value = value.clone().into();
        assert_eq!(back, json!({"zeta": 1.0, "alpha": {"b": [1.0, 2.0], "a": null}}));
    }

    #[test]
    fn test_structural_equality_across_types() {
        assert_ne!(Value::Number(1.0), Value::string("1"));
        assert_ne!(Value::Boolean(true), Value::Number(1.0));
        assert_eq!(Value::Null, Value::Null);
        assert_eq!(
            Value::List(vec![Value::Number(1.0)]),
            Value::List(vec![Value::Number(1.0)])
        );
    }
}
