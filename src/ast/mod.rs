//! Abstract Syntax Tree (AST) definitions for template expressions
//!
//! This module provides the core AST types used to represent parsed
//! template expressions. Nodes are immutable once built and may be cached
//! and re-evaluated against any number of data contexts.

#![warn(missing_docs)]

mod expression;
mod operator;

pub use expression::*;
pub use operator::*;
