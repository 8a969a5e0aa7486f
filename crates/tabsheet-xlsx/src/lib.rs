//! # tabsheet-xlsx
//!
//! XLSX (Office Open XML) writer for tabsheet worksheet models, plus a small
//! reader that loads the first worksheet of a package back for verification.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;
mod strings;
mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::{ReadCell, SheetContents, XlsxReader, MAX_TEXT_GRID_CELLS};
pub use writer::{XlsxWriter, PART_NAMES};

/// MIME type of an `.xlsx` package
pub const MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
