//! Table extraction error types

use thiserror::Error;

/// Result type for table extraction
pub type ExtractionResult<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while extracting a table
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document contains no `<table>` element
    #[error("No table found in the HTML document")]
    NoTableFound,

    /// The markup cannot be turned into a grid at all
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),
}
