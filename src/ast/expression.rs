//! Expression AST node definitions

use crate::ast::operator::{BinaryOperator, UnaryOperator};
use serde::{Deserialize, Serialize};

/// AST representation of template expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExpressionNode {
    /// Literal value (number, string, boolean, null)
    Literal(LiteralValue),

    /// Dotted property path, including the reserved roots
    /// `$root`, `$data` and `$index`
    Identifier(String),

    /// Function call with name and eagerly-evaluated arguments
    FunctionCall {
        /// Function name
        name: String,
        /// Function arguments
        args: Vec<ExpressionNode>,
    },

    /// Binary operation (arithmetic, comparison, logical)
    BinaryOp {
        /// The operator
        op: BinaryOperator,
        /// Left operand
        left: Box<ExpressionNode>,
        /// Right operand
        right: Box<ExpressionNode>,
    },

    /// Unary prefix operation (logical or numeric negation)
    UnaryOp {
        /// The operator
        op: UnaryOperator,
        /// The operand
        operand: Box<ExpressionNode>,
    },

    /// Conditional expression (`condition ? whenTrue : whenFalse`);
    /// only the selected branch is evaluated
    Ternary {
        /// Condition
        condition: Box<ExpressionNode>,
        /// Branch taken when the condition is truthy
        when_true: Box<ExpressionNode>,
        /// Branch taken when the condition is falsy
        when_false: Box<ExpressionNode>,
    },
}

/// Literal values in template expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// Boolean literal
    Boolean(bool),
    /// Number literal; all numbers are double-precision, `42` parses as `42.0`
    Number(f64),
    /// String literal
    String(String),
    /// Null literal
    Null,
}

impl ExpressionNode {
    /// Create a literal expression
    pub fn literal(value: LiteralValue) -> Self {
        Self::Literal(value)
    }

    /// Create an identifier expression
    pub fn identifier(path: impl Into<String>) -> Self {
        Self::Identifier(path.into())
    }

    /// Create a function call expression
    pub fn function_call(name: impl Into<String>, args: Vec<ExpressionNode>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression
    pub fn unary_op(op: UnaryOperator, operand: ExpressionNode) -> Self {
        Self::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a ternary conditional expression
    pub fn ternary(
        condition: ExpressionNode,
        when_true: ExpressionNode,
        when_false: ExpressionNode,
    ) -> Self {
        Self::Ternary {
            condition: Box::new(condition),
            when_true: Box::new(when_true),
            when_false: Box::new(when_false),
        }
    }

    /// Check if this expression is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Check if this expression is an identifier
    pub fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier(_))
    }

    /// Get the literal value if this is a literal expression
    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            Self::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Get the identifier path if this is an identifier expression
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(path) => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_creation() {
        let literal = ExpressionNode::literal(LiteralValue::Number(42.0));
        assert!(literal.is_literal());
        assert_eq!(literal.as_literal(), Some(&LiteralValue::Number(42.0)));

        let identifier = ExpressionNode::identifier("user.name");
        assert!(identifier.is_identifier());
        assert_eq!(identifier.as_identifier(), Some("user.name"));
    }

    #[test]
    fn test_complex_expression() {
        // Build: age >= 18 ? toUpper(name) : 'minor'
        let condition = ExpressionNode::binary_op(
            BinaryOperator::GreaterThanOrEqual,
            ExpressionNode::identifier("age"),
            ExpressionNode::literal(LiteralValue::Number(18.0)),
        );
        let when_true = ExpressionNode::function_call(
            "toUpper",
            vec![ExpressionNode::identifier("name")],
        );
        let when_false = ExpressionNode::literal(LiteralValue::String("minor".to_string()));

        let expr = ExpressionNode::ternary(condition, when_true, when_false);
        match expr {
            ExpressionNode::Ternary { condition, .. } => match *condition {
                ExpressionNode::BinaryOp {
                    op: BinaryOperator::GreaterThanOrEqual,
                    ..
                } => {}
                _ => panic!("Expected relational condition"),
            },
            _ => panic!("Expected ternary"),
        }
    }
}
