//! Cell-related types
//!
//! This module contains:
//! - [`Cell`] - A placed, styled and interned worksheet cell
//! - [`Row`] - The cells of one worksheet row
//! - [`CellAddress`] - A cell's location (e.g., "A1")

mod address;

pub use address::CellAddress;

/// A worksheet cell.
///
/// Cells are created once while a [`SpreadsheetModel`](crate::SpreadsheetModel)
/// is built and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    row: u32,
    col: u16,
    style_id: u32,
    string_id: u32,
}

impl Cell {
    pub(crate) fn new(text: String, row: u32, col: u16, style_id: u32, string_id: u32) -> Self {
        Self {
            text,
            row,
            col,
            style_id,
            string_id,
        }
    }

    /// Trimmed text of the source table cell (may be empty)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Row index (0-based)
    pub fn row_index(&self) -> u32 {
        self.row
    }

    /// Column index (0-based)
    pub fn col_index(&self) -> u16 {
        self.col
    }

    /// Index into the model's [`StyleRegistry`](crate::StyleRegistry)
    pub fn style_id(&self) -> u32 {
        self.style_id
    }

    /// Index into the model's [`SharedStringTable`](crate::SharedStringTable)
    pub fn string_id(&self) -> u32 {
        self.string_id
    }

    /// A1-style address of this cell
    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }
}

/// One worksheet row, cells in left-to-right order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    index: u32,
    cells: Vec<Cell>,
}

impl Row {
    pub(crate) fn new(index: u32, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }

    /// Row index (0-based)
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Cells of the row
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by column index
    pub fn get(&self, col: u16) -> Option<&Cell> {
        self.cells.get(col as usize)
    }
}
