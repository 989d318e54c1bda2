//! Logic and predicate functions
//!
//! Arguments reach these functions already evaluated; only the `&&`/`||`
//! operators and the ternary short-circuit at the expression level.

use super::{number_arg, string_arg};
use crate::model::{Value, ValueType};
use crate::registry::function::{FunctionError, FunctionResult, TemplateFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};
use regex::Regex;

/// if() function - selects between two values by a condition's truthiness
pub struct IfFunction;

impl TemplateFunction for IfFunction {
    fn name(&self) -> &str {
        "if"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "if",
                vec![
                    ParameterInfo::required("condition", ValueType::Any),
                    ParameterInfo::required("whenTrue", ValueType::Any),
                    ParameterInfo::required("whenFalse", ValueType::Any),
                ],
                ValueType::Any,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let selected = if args[0].is_truthy() { &args[1] } else { &args[2] };
        Ok(selected.clone())
    }
}

/// equals() function - structural equality across mixed types
pub struct EqualsFunction;

impl TemplateFunction for EqualsFunction {
    fn name(&self) -> &str {
        "equals"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "equals",
                vec![
                    ParameterInfo::required("left", ValueType::Any),
                    ParameterInfo::required("right", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Boolean(args[0] == args[1]))
    }
}

/// not() function - negates the argument's truthiness
pub struct NotFunction;

impl TemplateFunction for NotFunction {
    fn name(&self) -> &str {
        "not"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "not",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Boolean(!args[0].is_truthy()))
    }
}

/// and() function - true when every argument is truthy
pub struct AndFunction;

impl TemplateFunction for AndFunction {
    fn name(&self) -> &str {
        "and"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::variadic(
                "and",
                vec![
                    ParameterInfo::required("first", ValueType::Any),
                    ParameterInfo::required("second", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Boolean(args.iter().all(Value::is_truthy)))
    }
}

/// or() function - true when any argument is truthy
pub struct OrFunction;

impl TemplateFunction for OrFunction {
    fn name(&self) -> &str {
        "or"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::variadic(
                "or",
                vec![
                    ParameterInfo::required("first", ValueType::Any),
                    ParameterInfo::required("second", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Boolean(args.iter().any(Value::is_truthy)))
    }
}

/// greaterThan() function - numeric comparison
pub struct GreaterThanFunction;

impl TemplateFunction for GreaterThanFunction {
    fn name(&self) -> &str {
        "greaterThan"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "greaterThan",
                vec![
                    ParameterInfo::required("left", ValueType::Any),
                    ParameterInfo::required("right", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        Ok(Value::Boolean(left > right))
    }
}

/// lessThan() function - numeric comparison
pub struct LessThanFunction;

impl TemplateFunction for LessThanFunction {
    fn name(&self) -> &str {
        "lessThan"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "lessThan",
                vec![
                    ParameterInfo::required("left", ValueType::Any),
                    ParameterInfo::required("right", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let left = number_arg(self.name(), 0, args)?;
        let right = number_arg(self.name(), 1, args)?;
        Ok(Value::Boolean(left < right))
    }
}

/// exists() function - true when the argument is not null
pub struct ExistsFunction;

impl TemplateFunction for ExistsFunction {
    fn name(&self) -> &str {
        "exists"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "exists",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::Boolean(!args[0].is_null()))
    }
}

/// empty() function - true for null, empty strings, lists and objects
pub struct EmptyFunction;

impl TemplateFunction for EmptyFunction {
    fn name(&self) -> &str {
        "empty"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "empty",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let empty = match &args[0] {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::List(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Boolean(_) | Value::Number(_) => false,
        };
        Ok(Value::Boolean(empty))
    }
}

/// isMatch() function - regular expression test
pub struct IsMatchFunction;

impl TemplateFunction for IsMatchFunction {
    fn name(&self) -> &str {
        "isMatch"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "isMatch",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("pattern", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let pattern = string_arg(self.name(), 1, args)?;
        let regex = Regex::new(&pattern).map_err(|e| FunctionError::EvaluationError {
            name: self.name().to_string(),
            message: format!("invalid pattern: {e}"),
        })?;
        Ok(Value::Boolean(regex.is_match(&value)))
    }
}
