//! Collection access functions

use crate::model::{Value, ValueType};
use crate::registry::function::{FunctionResult, TemplateFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// count() function - number of items in a collection
///
/// Lists and objects report their element count, strings their character
/// count; null counts as zero and any other scalar as one.
pub struct CountFunction;

impl TemplateFunction for CountFunction {
    fn name(&self) -> &str {
        "count"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "count",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Number,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let count = match &args[0] {
            Value::List(items) => items.len(),
            Value::Object(map) => map.len(),
            Value::String(s) => s.chars().count(),
            Value::Null => 0,
            Value::Boolean(_) | Value::Number(_) => 1,
        };
        Ok(Value::Number(count as f64))
    }
}

/// first() function - first element of a list, or first character of a string
pub struct FirstFunction;

impl TemplateFunction for FirstFunction {
    fn name(&self) -> &str {
        "first"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "first",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Any,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let result = match &args[0] {
            Value::List(items) => items.first().cloned().unwrap_or(Value::Null),
            Value::String(s) => s
                .chars()
                .next()
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
            other => other.clone(),
        };
        Ok(result)
    }
}

/// last() function - last element of a list, or last character of a string
pub struct LastFunction;

impl TemplateFunction for LastFunction {
    fn name(&self) -> &str {
        "last"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "last",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Any,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let result = match &args[0] {
            Value::List(items) => items.last().cloned().unwrap_or(Value::Null),
            Value::String(s) => s
                .chars()
                .next_back()
                .map(|c| Value::String(c.to_string()))
                .unwrap_or(Value::Null),
            other => other.clone(),
        };
        Ok(result)
    }
}
