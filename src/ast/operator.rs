//! Operator definitions for template expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators, lowest to highest precedence tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// Logical OR (`||`), short-circuiting
    Or,
    /// Logical AND (`&&`), short-circuiting
    And,
    /// Equality (`==`), structural across mixed types
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Numeric less-than (`<`)
    LessThan,
    /// Numeric less-than-or-equal (`<=`)
    LessThanOrEqual,
    /// Numeric greater-than (`>`)
    GreaterThan,
    /// Numeric greater-than-or-equal (`>=`)
    GreaterThanOrEqual,
    /// Addition, or string concatenation when either operand is non-numeric (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Modulo,
}

impl BinaryOperator {
    /// Operator symbol as written in expression source
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// Check if this operator compares its operands numerically
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            BinaryOperator::LessThan
                | BinaryOperator::LessThanOrEqual
                | BinaryOperator::GreaterThan
                | BinaryOperator::GreaterThanOrEqual
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Logical negation (`!`), applied to the operand's truthiness
    Not,
    /// Numeric negation (`-`)
    Minus,
}

impl UnaryOperator {
    /// Operator symbol as written in expression source
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Minus => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
