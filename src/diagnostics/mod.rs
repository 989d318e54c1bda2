//! Diagnostics for lenient template expansion
//!
//! Under the default lenient policy a failing expression span degrades to
//! an empty string; the error itself is reported out-of-band through these
//! types so callers can still see what went wrong.

#![warn(missing_docs)]

mod diagnostic;

pub use diagnostic::*;
