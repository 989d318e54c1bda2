//! Error types for expression evaluation

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::registry::FunctionError;
use thiserror::Error;

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Errors that can occur while evaluating an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    /// A builtin function rejected its arguments
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// Call to a function name with no registry entry
    #[error("Unknown function '{name}'")]
    UnknownFunction {
        /// The unresolved function name
        name: String,
    },

    /// Operator applied to operand types with no defined coercion
    #[error("Operator '{operator}' cannot be applied to {left} and {right}")]
    InvalidOperandTypes {
        /// Operator symbol
        operator: String,
        /// Left operand type
        left: String,
        /// Right operand type
        right: String,
    },

    /// Unary operator applied to an operand with no defined coercion
    #[error("Operator '{operator}' cannot be applied to {operand}")]
    InvalidUnaryOperand {
        /// Operator symbol
        operator: String,
        /// Operand type
        operand: String,
    },

    /// Division or remainder by zero at the operator level
    #[error("Division by zero")]
    DivisionByZero,
}

impl EvaluationError {
    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            EvaluationError::Function(err) => err.to_diagnostic(),
            EvaluationError::UnknownFunction { .. } => {
                DiagnosticBuilder::error(DiagnosticCode::UnknownFunction)
                    .with_message(self.to_string())
                    .build()
            }
            EvaluationError::InvalidOperandTypes { .. }
            | EvaluationError::InvalidUnaryOperand { .. } => {
                DiagnosticBuilder::error(DiagnosticCode::InvalidOperandTypes)
                    .with_message(self.to_string())
                    .build()
            }
            EvaluationError::DivisionByZero => {
                DiagnosticBuilder::error(DiagnosticCode::DivisionByZero)
                    .with_message(self.to_string())
                    .build()
            }
        }
    }
}
