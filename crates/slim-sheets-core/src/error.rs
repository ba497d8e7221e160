//! Error types for slim-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in slim-sheets-core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cell reference does not have the letters-then-digits shape
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),
}
