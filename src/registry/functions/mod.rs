//! Built-in function library
//!
//! Functions are grouped by category the way expressions use them:
//! string manipulation, math, logic and collection access.

pub mod collection;
pub mod logic;
pub mod math;
pub mod string;

use crate::model::Value;
use crate::registry::function::{FunctionError, FunctionResult};

/// String view of an argument. Null coerces to the empty string and
/// scalars to their output form, so missing properties flow through
/// string functions instead of erroring. Lists and objects do not coerce.
pub(crate) fn string_arg(name: &str, index: usize, args: &[Value]) -> FunctionResult<String> {
    match &args[index] {
        Value::List(_) | Value::Object(_) => Err(FunctionError::InvalidArgumentType {
            name: name.to_string(),
            index,
            expected: "String".to_string(),
            actual: args[index].type_name().to_string(),
        }),
        value => Ok(value.to_output_string()),
    }
}

/// Numeric view of an argument. Numbers and numeric strings coerce;
/// everything else, null included, is a type error.
pub(crate) fn number_arg(name: &str, index: usize, args: &[Value]) -> FunctionResult<f64> {
    args[index]
        .as_number()
        .ok_or_else(|| FunctionError::InvalidArgumentType {
            name: name.to_string(),
            index,
            expected: "Number".to_string(),
            actual: args[index].type_name().to_string(),
        })
}
