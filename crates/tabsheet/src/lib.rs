//! # tabsheet
//!
//! Convert the first `<table>` of an HTML document into a single-sheet XLSX
//! workbook.
//!
//! The pipeline has three stages, each in its own crate:
//!
//! 1. [`TableExtractor`] parses the HTML and flattens the first table into a
//!    rectangular [`CellGrid`]
//! 2. [`SpreadsheetModel::build`] interns cell text and styles (header row
//!    bold, every cell right aligned)
//! 3. [`XlsxWriter`] serializes the model into a deterministic `.xlsx`
//!    package
//!
//! [`Converter`] runs all three for one request.
//!
//! ## Example
//!
//! ```rust
//! use tabsheet::prelude::*;
//!
//! let html = "<table><tr><td>Name</td><td>Age</td></tr><tr><td>Ana</td><td>30</td></tr></table>";
//! let conversion = tabsheet::convert(html).unwrap();
//! assert_eq!(conversion.file_name, "converted.xlsx");
//!
//! let sheet = XlsxReader::read_bytes(&conversion.bytes).unwrap();
//! assert_eq!(sheet.cell("B2").unwrap().text, "30");
//!
//! // Save to file
//! // conversion.save("people.xlsx").unwrap();
//! ```

pub mod convert;
pub mod error;
pub mod prelude;
pub mod preview;

pub use convert::{convert, Conversion, ConvertOptions, Converter, DEFAULT_FILE_NAME};
pub use error::{ConvertError, ConvertResult};
pub use preview::preview_text;

// Re-export core types
pub use tabsheet_core::{
    build_model, CellAddress, CellGrid, EmptyGridPolicy, FormattingPolicy, GridCell,
    HorizontalAlignment, ModelOptions, SpreadsheetModel, Style, DEFAULT_SHEET_NAME, MAX_COLS,
    MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export extraction types
pub use tabsheet_html::{extract_table, ExtractOptions, TableExtractor, WhitespaceMode};

// Re-export I/O types
pub use tabsheet_xlsx::{ReadCell, SheetContents, XlsxReader, XlsxWriter, MIME_TYPE};
