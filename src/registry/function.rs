//! Function trait, errors and the registry table

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::model::{Value, ValueType};
use crate::registry::signature::FunctionSignature;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for function operations
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Function evaluation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    /// Invalid number of arguments
    #[error("Function '{name}' expects {min}-{} arguments, got {actual}", max.map_or("*".to_string(), |n| n.to_string()))]
    InvalidArity {
        /// Function name
        name: String,
        /// Minimum arguments
        min: usize,
        /// Maximum arguments (None for unlimited)
        max: Option<usize>,
        /// Actual arguments provided
        actual: usize,
    },

    /// Invalid argument type
    #[error("Function '{name}' argument {index} expects {expected}, got {actual}")]
    InvalidArgumentType {
        /// Function name
        name: String,
        /// Argument index
        index: usize,
        /// Expected type
        expected: String,
        /// Actual type
        actual: String,
    },

    /// Division by zero in a math function
    #[error("Function '{name}': division by zero")]
    DivisionByZero {
        /// Function name
        name: String,
    },

    /// Runtime evaluation error
    #[error("Function '{name}' evaluation error: {message}")]
    EvaluationError {
        /// Function name
        name: String,
        /// Error message
        message: String,
    },
}

impl FunctionError {
    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            FunctionError::InvalidArity { .. } => DiagnosticCode::InvalidArity,
            FunctionError::InvalidArgumentType { .. } => DiagnosticCode::InvalidArgumentTypes,
            FunctionError::DivisionByZero { .. } => DiagnosticCode::DivisionByZero,
            FunctionError::EvaluationError { .. } => {
                DiagnosticCode::Custom("function_error".to_string())
            }
        };
        DiagnosticBuilder::error(code)
            .with_message(self.to_string())
            .build()
    }
}

/// Trait for implementing template builtin functions
///
/// Implementations are pure: arguments arrive already evaluated, the
/// return value is a plain `Value`, and no host state is touched.
pub trait TemplateFunction: Send + Sync {
    /// Get the function name as written in expressions
    fn name(&self) -> &str;

    /// Get the function signature
    fn signature(&self) -> &FunctionSignature;

    /// Evaluate the function with already-evaluated arguments
    fn evaluate(&self, args: &[Value]) -> FunctionResult<Value>;

    /// Get function documentation
    fn documentation(&self) -> &str {
        ""
    }

    /// Validate arguments before evaluation (both arity and types)
    fn validate_args(&self, args: &[Value]) -> FunctionResult<()> {
        let sig = self.signature();
        let arg_count = args.len();

        if arg_count < sig.min_arity {
            return Err(FunctionError::InvalidArity {
                name: self.name().to_string(),
                min: sig.min_arity,
                max: sig.max_arity,
                actual: arg_count,
            });
        }

        if let Some(max) = sig.max_arity {
            if arg_count > max {
                return Err(FunctionError::InvalidArity {
                    name: self.name().to_string(),
                    min: sig.min_arity,
                    max: sig.max_arity,
                    actual: arg_count,
                });
            }
        }

        let arg_types: Vec<ValueType> = args.iter().map(|a| a.value_type()).collect();
        if !sig.matches(&arg_types) {
            for (i, arg_type) in arg_types.iter().enumerate() {
                let param = sig
                    .parameters
                    .get(i)
                    .or_else(|| sig.parameters.last().filter(|_| sig.max_arity.is_none()));
                if let Some(param) = param {
                    if !param.param_type.is_compatible_with(arg_type) {
                        return Err(FunctionError::InvalidArgumentType {
                            name: self.name().to_string(),
                            index: i,
                            expected: param.param_type.to_string(),
                            actual: arg_type.to_string(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Registry for template builtin functions
///
/// Built once, read-only thereafter; safe for unsynchronized concurrent
/// reads from any number of evaluation threads.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Arc<dyn TemplateFunction>>,
}

impl FunctionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            functions: FxHashMap::default(),
        }
    }

    /// Register a function, replacing any previous entry with the same name
    pub fn register<F: TemplateFunction + 'static>(&mut self, function: F) {
        self.functions
            .insert(function.name().to_string(), Arc::new(function));
    }

    /// Get a function by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn TemplateFunction>> {
        self.functions.get(name).cloned()
    }

    /// Check if a function exists
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Get all registered function names
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }

    /// Get the signature of a registered function
    pub fn signature(&self, name: &str) -> Option<FunctionSignature> {
        self.functions.get(name).map(|f| f.signature().clone())
    }

    /// Number of registered functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.function_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::signature::ParameterInfo;

    struct EchoFunction;

    impl TemplateFunction for EchoFunction {
        fn name(&self) -> &str {
            "echo"
        }
        fn signature(&self) -> &FunctionSignature {
            static SIG: std::sync::LazyLock<FunctionSignature> =
                std::sync::LazyLock::new(|| {
                    FunctionSignature::new(
                        "echo",
                        vec![ParameterInfo::required("value", ValueType::Any)],
                        ValueType::Any,
                    )
                });
            &SIG
        }
        fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
            self.validate_args(args)?;
            Ok(args[0].clone())
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = FunctionRegistry::new();
        registry.register(EchoFunction);

        assert!(registry.contains("echo"));
        assert!(!registry.contains("missing"));

        let f = registry.get("echo").unwrap();
        let result = f.evaluate(&[Value::string("hi")]).unwrap();
        assert_eq!(result, Value::string("hi"));
    }

    #[test]
    fn test_arity_validation() {
        let err = EchoFunction.evaluate(&[]).unwrap_err();
        assert!(matches!(err, FunctionError::InvalidArity { actual: 0, .. }));
    }
}
