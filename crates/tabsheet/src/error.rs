//! Conversion error types

use tabsheet_html::ExtractionError;
use tabsheet_xlsx::XlsxError;
use thiserror::Error;

/// Result type for conversions
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors that can end a conversion request
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The document contains no `<table>` element
    #[error("No table found in the HTML document")]
    NoTableFound,

    /// The table has no rows and empty worksheets were refused
    #[error("The table has no rows")]
    EmptyGrid,

    /// The input cannot be read as a table
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// The configured worksheet name is not allowed
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// The model broke an internal invariant; nothing was written
    #[error("Internal invariant violated: {0}")]
    InternalInvariantViolation(String),

    /// The archive could not be assembled
    #[error("Failed to build the XLSX package: {0}")]
    PackagingFailure(XlsxError),

    /// Reading the input or writing the output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Whether the request can be retried with different input or options.
    ///
    /// Invariant violations and packaging failures are defects and are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ConvertError::NoTableFound
                | ConvertError::EmptyGrid
                | ConvertError::MalformedMarkup(_)
                | ConvertError::InvalidSheetName(_)
                | ConvertError::Io(_)
        )
    }
}

impl From<ExtractionError> for ConvertError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::NoTableFound => ConvertError::NoTableFound,
            ExtractionError::MalformedMarkup(msg) => ConvertError::MalformedMarkup(msg),
        }
    }
}

impl From<tabsheet_core::Error> for ConvertError {
    fn from(err: tabsheet_core::Error) -> Self {
        use tabsheet_core::Error;
        match err {
            Error::EmptyGrid => ConvertError::EmptyGrid,
            Error::InvalidSheetName(msg) => ConvertError::InvalidSheetName(msg),
            Error::InternalInvariantViolation(msg) => ConvertError::InternalInvariantViolation(msg),
            e @ (Error::RowOutOfBounds(..) | Error::ColumnOutOfBounds(..)) => {
                ConvertError::MalformedMarkup(e.to_string())
            }
        }
    }
}

impl From<XlsxError> for ConvertError {
    fn from(err: XlsxError) -> Self {
        match err {
            XlsxError::InternalInvariantViolation(msg) => {
                ConvertError::InternalInvariantViolation(msg)
            }
            XlsxError::Io(e) => ConvertError::Io(e),
            XlsxError::Core(e) => e.into(),
            other => ConvertError::PackagingFailure(other),
        }
    }
}
