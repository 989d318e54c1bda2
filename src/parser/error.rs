//! Lexer and parser error types

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors produced while tokenizing an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// Unrecognized character in the input
    #[error("Unrecognized character '{character}' at position {position}")]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Byte offset where it was found
        position: usize,
    },

    /// Unterminated string literal
    #[error("Unclosed string literal starting at position {position}")]
    UnclosedString {
        /// Byte offset where the string started
        position: usize,
    },

    /// Invalid escape sequence inside a string literal
    #[error("Invalid escape sequence '\\{sequence}' at position {position}")]
    InvalidEscape {
        /// The character following the backslash
        sequence: char,
        /// Byte offset of the backslash
        position: usize,
    },

    /// Malformed numeric literal
    #[error("Invalid number literal '{value}' at position {position}")]
    InvalidNumber {
        /// The text that failed to parse
        value: String,
        /// Byte offset where the literal started
        position: usize,
    },
}

/// Errors produced while parsing a token stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Tokenization failed before parsing could start
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token that no grammar rule accepts at this point
    #[error("Unexpected token '{token}' at position {position}")]
    UnexpectedToken {
        /// Text of the unexpected token
        token: String,
        /// Byte offset of the token
        position: usize,
    },

    /// The input ended where more tokens were required
    #[error("Unexpected end of expression")]
    UnexpectedEof,

    /// A specific token was required but something else was found
    #[error("Expected {expected} at position {position}")]
    ExpectedToken {
        /// Description of the expected token
        expected: String,
        /// Byte offset where it was expected
        position: usize,
    },

    /// Tokens remained after a complete expression was parsed
    #[error("Trailing input '{token}' after expression at position {position}")]
    TrailingTokens {
        /// Text of the first trailing token
        token: String,
        /// Byte offset of the trailing token
        position: usize,
    },
}

impl LexError {
    /// Byte offset the error points at
    pub fn position(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { position, .. }
            | LexError::UnclosedString { position }
            | LexError::InvalidEscape { position, .. }
            | LexError::InvalidNumber { position, .. } => *position,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self {
            LexError::UnexpectedCharacter { .. } => DiagnosticCode::UnexpectedToken,
            LexError::UnclosedString { .. } => DiagnosticCode::UnclosedString,
            LexError::InvalidEscape { .. } => DiagnosticCode::InvalidEscape,
            LexError::InvalidNumber { .. } => DiagnosticCode::InvalidNumber,
        };
        DiagnosticBuilder::error(code)
            .with_message(self.to_string())
            .with_offset(self.position())
            .build()
    }
}

impl ParseError {
    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::UnexpectedToken { position, .. }
            | ParseError::TrailingTokens { position, .. } => {
                DiagnosticBuilder::error(DiagnosticCode::UnexpectedToken)
                    .with_message(self.to_string())
                    .with_offset(*position)
                    .build()
            }
            ParseError::UnexpectedEof => {
                DiagnosticBuilder::error(DiagnosticCode::UnexpectedToken)
                    .with_message(self.to_string())
                    .build()
            }
            ParseError::ExpectedToken { expected, position } => {
                DiagnosticBuilder::error(DiagnosticCode::ExpectedToken(expected.clone()))
                    .with_message(self.to_string())
                    .with_offset(*position)
                    .build()
            }
        }
    }
}
