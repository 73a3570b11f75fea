//! Typed error kinds
//!
//! Most of the program propagates [`anyhow::Error`], but a few failures are
//! part of the contract of individual components and get a dedicated variant.

use thiserror::Error;

/// Errors with a meaning that callers may want to match on
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A parameter was outside of its domain of definition
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        name: &'static str,
        message: String,
    },

    /// A lexicon file does not follow the expected format
    #[error("malformed lexicon at line {line}: {message}")]
    Lexicon { line: usize, message: String },
}
