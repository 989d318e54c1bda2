//! Runtime value model for template expressions
//!
//! Template data is schema-less JSON, so evaluation operates over a closed
//! tagged union of the JSON shapes rather than an open "any" type.

#![warn(missing_docs)]

mod types;
mod value;

pub use types::*;
pub use value::*;
