//! Error types for tabsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tabsheet-core
#[derive(Debug, Error)]
pub enum Error {
    /// The grid has no rows and the empty-grid policy forbids an empty worksheet
    #[error("Table has no rows")]
    EmptyGrid,

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Internal state that cannot occur through the public constructors
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl Error {
    /// Create an invariant violation error with a message
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Error::InternalInvariantViolation(msg.into())
    }
}
