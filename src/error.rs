//! Crate-level error aggregation

use crate::diagnostics::Diagnostic;
use crate::evaluator::EvaluationError;
use crate::parser::ParseError;
use thiserror::Error;

/// Result type for template engine operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// An error tied to one embedded expression span
///
/// Under the lenient policy these never surface as `Err`; they degrade to
/// empty-string substitutions and are reported as diagnostics. The strict
/// policy returns the first one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    /// The span's source failed to lex or parse
    #[error("Failed to parse expression '{expression}': {source}")]
    Parse {
        /// The expression source text
        expression: String,
        /// The underlying parse error
        source: ParseError,
    },

    /// The span's expression failed to evaluate
    #[error("Failed to evaluate expression '{expression}': {source}")]
    Evaluation {
        /// The expression source text
        expression: String,
        /// The underlying evaluation error
        source: EvaluationError,
    },
}

impl TemplateError {
    /// Wrap a parse error with its expression source
    pub fn parse(expression: impl Into<String>, source: ParseError) -> Self {
        Self::Parse {
            expression: expression.into(),
            source,
        }
    }

    /// Wrap an evaluation error with its expression source
    pub fn evaluation(expression: impl Into<String>, source: EvaluationError) -> Self {
        Self::Evaluation {
            expression: expression.into(),
            source,
        }
    }

    /// The source text of the expression that failed
    pub fn expression(&self) -> &str {
        match self {
            Self::Parse { expression, .. } | Self::Evaluation { expression, .. } => expression,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diagnostic = match self {
            Self::Parse { source, .. } => source.to_diagnostic(),
            Self::Evaluation { source, .. } => source.to_diagnostic(),
        };
        diagnostic.expression = Some(self.expression().to_string());
        diagnostic
    }
}
