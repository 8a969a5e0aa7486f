//! # tabsheet-core
//!
//! Core data structures for the tabsheet HTML-table-to-XLSX converter.
//!
//! This crate provides the format-independent types used throughout tabsheet:
//! - [`CellGrid`] - The rectangular grid of text cells produced by table extraction
//! - [`SpreadsheetModel`] - A single worksheet with styled, interned cells
//! - [`Style`] and [`StyleRegistry`] - Deduplicated cell formatting
//! - [`SharedStringTable`] - Deduplicated cell text
//! - [`CellAddress`] - A1-style cell addressing
//!
//! ## Example
//!
//! ```rust
//! use tabsheet_core::{build_model, CellGrid};
//!
//! let grid = CellGrid::from_text_rows(vec![
//!     vec!["Name".to_string(), "Age".to_string()],
//!     vec!["Ana".to_string()],
//! ])
//! .unwrap();
//! assert_eq!(grid.col_count(), 2);
//!
//! let model = build_model(&grid).unwrap();
//! assert_eq!(model.row_count(), 2);
//! assert_eq!(model.strings().len(), 4); // "Name", "Age", "Ana", ""
//! ```

pub mod cell;
pub mod error;
pub mod grid;
pub mod model;
pub mod strings;
pub mod style;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, Row};
pub use error::{Error, Result};
pub use grid::{CellGrid, GridCell};
pub use model::{
    build_model, validate_sheet_name, EmptyGridPolicy, FormattingPolicy, ModelOptions,
    SpreadsheetModel, DEFAULT_SHEET_NAME,
};
pub use strings::SharedStringTable;
pub use style::{HorizontalAlignment, Style, StyleRegistry};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
