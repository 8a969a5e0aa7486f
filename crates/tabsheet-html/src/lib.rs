//! # tabsheet-html
//!
//! Extracts the first table of an HTML document into a rectangular
//! [`CellGrid`](tabsheet_core::CellGrid).
//!
//! Parsing goes through an HTML5 tree builder, so unclosed cells, stray end
//! tags and missing `<tbody>` elements are recovered the way a browser would.

pub mod error;
pub mod extract;
pub mod options;

pub use error::{ExtractionError, ExtractionResult};
pub use extract::{extract_table, TableExtractor};
pub use options::{ExtractOptions, WhitespaceMode};
