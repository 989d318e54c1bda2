//! Core diagnostic types

use crate::parser::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Hint - subtle suggestion for improvement
    Hint,
    /// Information - provides helpful information
    Info,
    /// Warning - may indicate a problem but doesn't prevent expansion
    Warning,
    /// Error - the affected span could not be expanded
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

/// Diagnostic error codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    /// Unexpected token in expression
    UnexpectedToken,
    /// Expected a specific token
    ExpectedToken(String),
    /// Unclosed string literal
    UnclosedString,
    /// Invalid number format
    InvalidNumber,
    /// Invalid escape sequence
    InvalidEscape,
    /// Unknown function
    UnknownFunction,
    /// Wrong number of arguments
    InvalidArity,
    /// Invalid operand types for operator
    InvalidOperandTypes,
    /// Invalid argument types for function
    InvalidArgumentTypes,
    /// Division by zero
    DivisionByZero,
    /// Invalid regular expression
    InvalidRegex,
    /// A `${` span with no matching `}` in the template text
    UnclosedExpression,
    /// Custom error with a string code
    Custom(String),
}

/// A diagnostic message produced during template expansion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Error code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Source text of the expression that produced the diagnostic
    pub expression: Option<String>,
    /// Location within the expression source, where known
    pub span: Option<Span>,
}

impl Diagnostic {
    /// Check if this diagnostic is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{:?}: {} (in '{expr}')", self.severity, self.message),
            None => write!(f, "{:?}: {}", self.severity, self.message),
        }
    }
}

/// Builder for constructing diagnostics
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    severity: Severity,
    code: DiagnosticCode,
    message: String,
    expression: Option<String>,
    span: Option<Span>,
}

impl DiagnosticBuilder {
    /// Start an error diagnostic
    pub fn error(code: DiagnosticCode) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: String::new(),
            expression: None,
            span: None,
        }
    }

    /// Start a warning diagnostic
    pub fn warning(code: DiagnosticCode) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: String::new(),
            expression: None,
            span: None,
        }
    }

    /// Set the human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the expression source text
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Attach a span within the expression source
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a single-offset location within the expression source
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.span = Some(Span::new(offset, offset + 1));
        self
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            severity: self.severity,
            code: self.code,
            message: self.message,
            expression: self.expression,
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let diagnostic = DiagnosticBuilder::error(DiagnosticCode::UnknownFunction)
            .with_message("Unknown function 'frobnicate'")
            .with_expression("frobnicate(1)")
            .with_span(Span::new(0, 10))
            .build();

        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.code, DiagnosticCode::UnknownFunction);
        assert_eq!(diagnostic.span, Some(Span::new(0, 10)));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert!(Severity::Info > Severity::Hint);
    }
}
