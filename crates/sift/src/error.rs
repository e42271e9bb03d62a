//! Error types for the sift crate.
//!
//! The search pipeline itself never fails; these errors only surface from the
//! strict parsing helpers that the pipeline wraps.

use thiserror::Error;

/// Errors produced when parsing request values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A sort direction other than `asc`/`desc` (or their long forms).
    #[error("unknown sort direction '{0}'")]
    Direction(String),

    /// A value that names none of the variants of an option set.
    #[error("'{value}' is not a valid {kind} option")]
    Option {
        kind: &'static str,
        value: String,
    },
}

/// Result type for sift parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;
