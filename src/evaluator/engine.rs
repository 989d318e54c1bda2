//! Expression evaluation engine

use crate::ast::{BinaryOperator, ExpressionNode, LiteralValue, UnaryOperator};
use crate::evaluator::context::EvaluationContext;
use crate::evaluator::error::{EvaluationError, EvaluationResult};
use crate::model::Value;
use crate::registry::{FunctionRegistry, default_registry};
use std::sync::Arc;

/// Walks expression trees against a data context
///
/// Holds only an `Arc` to its function registry; cloning is cheap and a
/// single evaluator may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    functions: Arc<FunctionRegistry>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Create an evaluator backed by the shared default registry
    pub fn new() -> Self {
        Self {
            functions: default_registry(),
        }
    }

    /// Create an evaluator with an injected function registry
    pub fn with_registry(functions: Arc<FunctionRegistry>) -> Self {
        Self { functions }
    }

    /// The registry this evaluator dispatches function calls into
    pub fn registry(&self) -> &Arc<FunctionRegistry> {
        &self.functions
    }

    /// Evaluate an expression against a data context
    pub fn evaluate(
        &self,
        expression: &ExpressionNode,
        context: &EvaluationContext,
    ) -> EvaluationResult<Value> {
        match expression {
            ExpressionNode::Literal(literal) => Ok(evaluate_literal(literal)),

            ExpressionNode::Identifier(path) => Ok(context.resolve(path)),

            ExpressionNode::UnaryOp { op, operand } => {
                let value = self.evaluate(operand, context)?;
                self.evaluate_unary_op(*op, value)
            }

            ExpressionNode::BinaryOp { op, left, right } => {
                self.evaluate_binary_op(*op, left, right, context)
            }

            ExpressionNode::Ternary {
                condition,
                when_true,
                when_false,
            } => {
                // Only the selected branch is evaluated
                let selected = if self.evaluate(condition, context)?.is_truthy() {
                    when_true
                } else {
                    when_false
                };
                self.evaluate(selected, context)
            }

            ExpressionNode::FunctionCall { name, args } => {
                self.evaluate_function_call(name, args, context)
            }
        }
    }

    fn evaluate_unary_op(&self, op: UnaryOperator, value: Value) -> EvaluationResult<Value> {
        match op {
            UnaryOperator::Not => Ok(Value::Boolean(!value.is_truthy())),
            UnaryOperator::Minus => match value.as_number() {
                Some(n) => Ok(Value::Number(-n)),
                None => Err(EvaluationError::InvalidUnaryOperand {
                    operator: op.symbol().to_string(),
                    operand: value.type_name().to_string(),
                }),
            },
        }
    }

    fn evaluate_binary_op(
        &self,
        op: BinaryOperator,
        left: &ExpressionNode,
        right: &ExpressionNode,
        context: &EvaluationContext,
    ) -> EvaluationResult<Value> {
        // Logical operators decide on the left operand alone where possible;
        // the right expression must not run when the outcome is fixed.
        if op == BinaryOperator::And {
            let left_value = self.evaluate(left, context)?;
            if !left_value.is_truthy() {
                return Ok(Value::Boolean(false));
            }
            let right_value = self.evaluate(right, context)?;
            return Ok(Value::Boolean(right_value.is_truthy()));
        }
        if op == BinaryOperator::Or {
            let left_value = self.evaluate(left, context)?;
            if left_value.is_truthy() {
                return Ok(Value::Boolean(true));
            }
            let right_value = self.evaluate(right, context)?;
            return Ok(Value::Boolean(right_value.is_truthy()));
        }

        let left_value = self.evaluate(left, context)?;
        let right_value = self.evaluate(right, context)?;

        match op {
            BinaryOperator::Equal => Ok(Value::Boolean(left_value == right_value)),
            BinaryOperator::NotEqual => Ok(Value::Boolean(left_value != right_value)),

            BinaryOperator::Add => Ok(evaluate_add(&left_value, &right_value)),

            BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide
            | BinaryOperator::Modulo => {
                let (l, r) = numeric_operands(op, &left_value, &right_value)?;
                match op {
                    BinaryOperator::Subtract => Ok(Value::Number(l - r)),
                    BinaryOperator::Multiply => Ok(Value::Number(l * r)),
                    BinaryOperator::Divide => {
                        if r == 0.0 {
                            Err(EvaluationError::DivisionByZero)
                        } else {
                            Ok(Value::Number(l / r))
                        }
                    }
                    BinaryOperator::Modulo => {
                        if r == 0.0 {
                            Err(EvaluationError::DivisionByZero)
                        } else {
                            Ok(Value::Number(l % r))
                        }
                    }
                    _ => unreachable!(),
                }
            }

            BinaryOperator::LessThan
            | BinaryOperator::LessThanOrEqual
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterThanOrEqual => {
                let (l, r) = numeric_operands(op, &left_value, &right_value)?;
                let result = match op {
                    BinaryOperator::LessThan => l < r,
                    BinaryOperator::LessThanOrEqual => l <= r,
                    BinaryOperator::GreaterThan => l > r,
                    BinaryOperator::GreaterThanOrEqual => l >= r,
                    _ => unreachable!(),
                };
                Ok(Value::Boolean(result))
            }

            BinaryOperator::And | BinaryOperator::Or => unreachable!("handled above"),
        }
    }

    fn evaluate_function_call(
        &self,
        name: &str,
        args: &[ExpressionNode],
        context: &EvaluationContext,
    ) -> EvaluationResult<Value> {
        let Some(function) = self.functions.get(name) else {
            return Err(EvaluationError::UnknownFunction {
                name: name.to_string(),
            });
        };

        // Arguments evaluate eagerly, left to right
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate(arg, context)?);
        }

        Ok(function.evaluate(&values)?)
    }
}

fn evaluate_literal(literal: &LiteralValue) -> Value {
    match literal {
        LiteralValue::Boolean(b) => Value::Boolean(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::String(s) => Value::String(s.clone()),
        LiteralValue::Null => Value::Null,
    }
}

/// `+` adds when both operands are numeric and concatenates otherwise
fn evaluate_add(left: &Value, right: &Value) -> Value {
    let both_numeric = matches!(left, Value::Number(_)) && matches!(right, Value::Number(_));
    if both_numeric {
        if let (Some(l), Some(r)) = (left.as_number(), right.as_number()) {
            return Value::Number(l + r);
        }
    }
    Value::String(format!(
        "{}{}",
        left.to_output_string(),
        right.to_output_string()
    ))
}

fn numeric_operands(
    op: BinaryOperator,
    left: &Value,
    right: &Value,
) -> EvaluationResult<(f64, f64)> {
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Ok((l, r)),
        _ => Err(EvaluationError::InvalidOperandTypes {
            operator: op.symbol().to_string(),
            left: left.type_name().to_string(),
            right: right.type_name().to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn eval(source: &str, data: serde_json::Value) -> EvaluationResult<Value> {
        let expr = parse(source).expect("expression parses");
        Evaluator::new().evaluate(&expr, &EvaluationContext::new(Value::from(data)))
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(eval("10 + 5 * 2", json!({})).unwrap(), Value::Number(20.0));
        assert_eq!(eval("(10 + 5) * 2", json!({})).unwrap(), Value::Number(30.0));
    }

    #[test]
    fn test_add_concatenates_with_non_numbers() {
        assert_eq!(
            eval("'Items: ' + 3", json!({})).unwrap(),
            Value::string("Items: 3")
        );
        assert_eq!(
            eval("1 + 'x'", json!({})).unwrap(),
            Value::string("1x")
        );
        assert_eq!(eval("1 + 2", json!({})).unwrap(), Value::Number(3.0));
        // Null stringifies to empty in concatenation
        assert_eq!(
            eval("'v=' + missing", json!({})).unwrap(),
            Value::string("v=")
        );
    }

    #[test]
    fn test_relational_requires_numbers() {
        assert_eq!(eval("2 < 3", json!({})).unwrap(), Value::Boolean(true));
        assert_eq!(eval("'12' >= 10", json!({})).unwrap(), Value::Boolean(true));
        assert!(matches!(
            eval("true < 1", json!({})),
            Err(EvaluationError::InvalidOperandTypes { .. })
        ));
    }

    #[test]
    fn test_equality_mixed_types() {
        assert_eq!(eval("1 == '1'", json!({})).unwrap(), Value::Boolean(false));
        assert_eq!(eval("1 != '1'", json!({})).unwrap(), Value::Boolean(true));
        assert_eq!(eval("missing == null", json!({})).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            eval("1 / 0", json!({})),
            Err(EvaluationError::DivisionByZero)
        ));
        assert!(matches!(
            eval("1 % 0", json!({})),
            Err(EvaluationError::DivisionByZero)
        ));
    }

    #[test]
    fn test_logical_short_circuit() {
        // The right side would be an unknown-function error if evaluated
        assert_eq!(
            eval("false && explode()", json!({})).unwrap(),
            Value::Boolean(false)
        );
        assert_eq!(
            eval("true || explode()", json!({})).unwrap(),
            Value::Boolean(true)
        );
        // And it is evaluated when the left side does not decide
        assert!(matches!(
            eval("true && explode()", json!({})),
            Err(EvaluationError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_truthiness_in_logic() {
        assert_eq!(eval("'x' && 1", json!({})).unwrap(), Value::Boolean(true));
        assert_eq!(eval("'' || 0", json!({})).unwrap(), Value::Boolean(false));
        assert_eq!(eval("missing || 'y'", json!({})).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_ternary_evaluates_selected_branch_only() {
        let data = json!({"age": 25});
        assert_eq!(
            eval("age >= 18 ? 'adult' : explode()", data.clone()).unwrap(),
            Value::string("adult")
        );
        assert!(matches!(
            eval("age < 18 ? 'minor' : explode()", data),
            Err(EvaluationError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_unary_operators() {
        assert_eq!(eval("-3 + 5", json!({})).unwrap(), Value::Number(2.0));
        assert_eq!(eval("!true", json!({})).unwrap(), Value::Boolean(false));
        assert_eq!(eval("!missing", json!({})).unwrap(), Value::Boolean(true));
        assert!(matches!(
            eval("-'abc'", json!({})),
            Err(EvaluationError::InvalidUnaryOperand { .. })
        ));
    }

    #[test]
    fn test_function_composition() {
        assert_eq!(
            eval("toUpper(toLower('MiXeD CaSe'))", json!({})).unwrap(),
            Value::string("MIXED CASE")
        );
    }

    #[test]
    fn test_null_propagates_through_functions() {
        assert_eq!(eval("toUpper(missing)", json!({})).unwrap(), Value::string(""));
    }

    #[test]
    fn test_unknown_function() {
        assert!(matches!(
            eval("frobnicate(1)", json!({})),
            Err(EvaluationError::UnknownFunction { .. })
        ));
    }

    #[test]
    fn test_identifier_resolution() {
        let data = json!({"user": {"name": "Ada"}});
        assert_eq!(eval("user.name", data).unwrap(), Value::string("Ada"));
    }

    #[test]
    fn test_parse_once_evaluate_many() {
        let expr = parse("greeting + ', ' + name").unwrap();
        let evaluator = Evaluator::new();

        let first = evaluator
            .evaluate(
                &expr,
                &EvaluationContext::new(Value::from(json!({"greeting": "Hi", "name": "Ada"}))),
            )
            .unwrap();
        let second = evaluator
            .evaluate(
                &expr,
                &EvaluationContext::new(Value::from(json!({"greeting": "Yo", "name": "Bob"}))),
            )
            .unwrap();

        assert_eq!(first, Value::string("Hi, Ada"));
        assert_eq!(second, Value::string("Yo, Bob"));
    }

    #[test]
    fn test_custom_registry_injection() {
        use crate::model::ValueType;
        use crate::registry::{
            FunctionRegistry, FunctionResult, FunctionSignature, ParameterInfo, TemplateFunction,
        };

        struct DoubleFunction;
        impl TemplateFunction for DoubleFunction {
            fn name(&self) -> &str {
                "double"
            }
            fn signature(&self) -> &FunctionSignature {
                static SIG: std::sync::LazyLock<FunctionSignature> =
                    std::sync::LazyLock::new(|| {
                        FunctionSignature::new(
                            "double",
                            vec![ParameterInfo::required("value", ValueType::Any)],
                            ValueType::Number,
                        )
                    });
                &SIG
            }
            fn evaluate(&self, args: &[Value]) -> FunctionResult<Value> {
                self.validate_args(args)?;
                Ok(Value::Number(args[0].as_number().unwrap_or(0.0) * 2.0))
            }
        }

        let mut registry = FunctionRegistry::new();
        registry.register(DoubleFunction);
        let evaluator = Evaluator::with_registry(Arc::new(registry));

        let expr = parse("double(21)").unwrap();
        let result = evaluator
            .evaluate(&expr, &EvaluationContext::new(Value::Null))
            .unwrap();
        assert_eq!(result, Value::Number(42.0));
    }
}
