//! String manipulation functions

use super::{number_arg, string_arg};
use crate::model::{Value, ValueType};
use crate::registry::function::{FunctionResult, TemplateFunction};
use crate::registry::signature::{FunctionSignature, ParameterInfo};

/// toUpper() function - uppercases a string
pub struct ToUpperFunction;

impl TemplateFunction for ToUpperFunction {
    fn name(&self) -> &str {
        "toUpper"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "toUpper",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::String(string_arg(self.name(), 0, args)?.to_uppercase()))
    }
}

/// toLower() function - lowercases a string
pub struct ToLowerFunction;

impl TemplateFunction for ToLowerFunction {
    fn name(&self) -> &str {
        "toLower"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "toLower",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::String(string_arg(self.name(), 0, args)?.to_lowercase()))
    }
}

/// substring() function - extracts a character range
pub struct SubstringFunction;

impl TemplateFunction for SubstringFunction {
    fn name(&self) -> &str {
        "substring"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "substring",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("start", ValueType::Any),
                    ParameterInfo::optional("length", ValueType::Any),
                ],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let start = number_arg(self.name(), 1, args)?.max(0.0) as usize;

        let chars: Vec<char> = value.chars().collect();
        if start >= chars.len() {
            return Ok(Value::String(String::new()));
        }

        let result: String = if args.len() > 2 {
            let length = number_arg(self.name(), 2, args)?.max(0.0) as usize;
            chars[start..].iter().take(length).collect()
        } else {
            chars[start..].iter().collect()
        };
        Ok(Value::String(result))
    }
}

/// length() function - number of characters in a string
pub struct LengthFunction;

impl TemplateFunction for LengthFunction {
    fn name(&self) -> &str {
        "length"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "length",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::Number,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        Ok(Value::Number(value.chars().count() as f64))
    }
}

/// trim() function - strips surrounding whitespace
pub struct TrimFunction;

impl TemplateFunction for TrimFunction {
    fn name(&self) -> &str {
        "trim"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "trim",
                vec![ParameterInfo::required("value", ValueType::Any)],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        Ok(Value::String(
            string_arg(self.name(), 0, args)?.trim().to_string(),
        ))
    }
}

/// replace() function - literal substring replacement
pub struct ReplaceFunction;

impl TemplateFunction for ReplaceFunction {
    fn name(&self) -> &str {
        "replace"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "replace",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("from", ValueType::Any),
                    ParameterInfo::required("to", ValueType::Any),
                ],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let from = string_arg(self.name(), 1, args)?;
        let to = string_arg(self.name(), 2, args)?;
        if from.is_empty() {
            return Ok(Value::String(value));
        }
        Ok(Value::String(value.replace(&from, &to)))
    }
}

/// split() function - splits a string into a list on a separator
pub struct SplitFunction;

impl TemplateFunction for SplitFunction {
    fn name(&self) -> &str {
        "split"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "split",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("separator", ValueType::Any),
                ],
                ValueType::List,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let separator = string_arg(self.name(), 1, args)?;
        let parts: Vec<Value> = if separator.is_empty() {
            value.chars().map(|c| Value::String(c.to_string())).collect()
        } else {
            value
                .split(&separator)
                .map(|p| Value::String(p.to_string()))
                .collect()
        };
        Ok(Value::List(parts))
    }
}

/// startsWith() function - prefix test
pub struct StartsWithFunction;

impl TemplateFunction for StartsWithFunction {
    fn name(&self) -> &str {
        "startsWith"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "startsWith",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("prefix", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let prefix = string_arg(self.name(), 1, args)?;
        Ok(Value::Boolean(value.starts_with(&prefix)))
    }
}

/// endsWith() function - suffix test
pub struct EndsWithFunction;

impl TemplateFunction for EndsWithFunction {
    fn name(&self) -> &str {
        "endsWith"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "endsWith",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("suffix", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let suffix = string_arg(self.name(), 1, args)?;
        Ok(Value::Boolean(value.ends_with(&suffix)))
    }
}

/// contains() function - substring test
pub struct ContainsFunction;

impl TemplateFunction for ContainsFunction {
    fn name(&self) -> &str {
        "contains"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::new(
                "contains",
                vec![
                    ParameterInfo::required("value", ValueType::Any),
                    ParameterInfo::required("substring", ValueType::Any),
                ],
                ValueType::Boolean,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let value = string_arg(self.name(), 0, args)?;
        let needle = string_arg(self.name(), 1, args)?;
        Ok(Value::Boolean(value.contains(&needle)))
    }
}

/// format() function - positional `{0}`-style placeholder substitution
pub struct FormatFunction;

impl TemplateFunction for FormatFunction {
    fn name(&self) -> &str {
        "format"
    }
    fn signature(&self) -> &FunctionSignature {
        static SIG: std::sync::LazyLock<FunctionSignature> = std::sync::LazyLock::new(|| {
            FunctionSignature::variadic(
                "format",
                vec![ParameterInfo::required("template", ValueType::Any)],
                ValueType::String,
            )
        });
        &SIG
    }
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
        self.validate_args(args)?;
        let template = string_arg(self.name(), 0, args)?;
        let substitutions = &args[1..];

        let mut output = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '{' {
                output.push(c);
                continue;
            }
            let mut digits = String::new();
            while let Some(d) = chars.peek().copied().filter(|d| d.is_ascii_digit()) {
                digits.push(d);
                chars.next();
            }
            if !digits.is_empty() && chars.peek() == Some(&'}') {
                chars.next();
                match digits.parse::<usize>().ok().and_then(|i| substitutions.get(i)) {
                    Some(value) => output.push_str(&value.to_output_string()),
                    // Placeholder with no matching argument stays literal
                    None => {
                        output.push('{');
                        output.push_str(&digits);
                        output.push('}');
                    }
                }
            } else {
                output.push('{');
                output.push_str(&digits);
            }
        }
        Ok(Value::String(output))
    }
}
