//! Value type descriptors for signature checking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime type of a template value, used by function signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// Matches any value
    Any,
    /// Null value
    Null,
    /// Boolean value
    Boolean,
    /// Double-precision number
    Number,
    /// String value
    String,
    /// Ordered list of values
    List,
    /// String-keyed object
    Object,
}

impl ValueType {
    /// Check whether an argument of type `actual` is acceptable where this
    /// type is expected. `Any` accepts everything; `Null` is accepted by
    /// every parameter type so that missing properties flow into functions
    /// instead of erroring at the call boundary.
    pub fn is_compatible_with(&self, actual: &ValueType) -> bool {
        *self == ValueType::Any || *actual == ValueType::Null || self == actual
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Any => "Any",
            ValueType::Null => "Null",
            ValueType::Boolean => "Boolean",
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::List => "List",
            ValueType::Object => "Object",
        };
        write!(f, "{name}")
    }
}
