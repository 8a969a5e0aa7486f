//! Rectangular text grid produced by table extraction

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// One cell of a [`CellGrid`]
///
/// Spans are recorded as read from the source markup. They are not expanded:
/// every source cell occupies exactly one grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCell {
    /// Trimmed cell text
    pub text: String,
    /// Declared `rowspan` (at least 1)
    pub row_span: u32,
    /// Declared `colspan` (at least 1)
    pub col_span: u32,
}

impl GridCell {
    /// Create a cell with no spans
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            row_span: 1,
            col_span: 1,
        }
    }

    /// Create an empty padding cell
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Set the declared spans, clamped to worksheet limits
    pub fn with_spans(mut self, row_span: u32, col_span: u32) -> Self {
        self.row_span = row_span.clamp(1, MAX_ROWS);
        self.col_span = col_span.clamp(1, MAX_COLS as u32);
        self
    }

    /// Whether the source cell declared a row or column span
    pub fn is_spanning(&self) -> bool {
        self.row_span > 1 || self.col_span > 1
    }
}

/// Rectangular grid of text cells
///
/// Built through [`CellGrid::new`], which pads short rows with empty cells so
/// every row has [`col_count`](CellGrid::col_count) cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellGrid {
    rows: Vec<Vec<GridCell>>,
    width: usize,
}

impl CellGrid {
    /// Build a grid from possibly ragged rows.
    ///
    /// Rows shorter than the widest row are padded with empty cells. When
    /// rows exist but all of them are empty, the grid is one column wide.
    pub fn new(mut rows: Vec<Vec<GridCell>>) -> Result<Self> {
        if rows.len() > MAX_ROWS as usize {
            return Err(Error::RowOutOfBounds(rows.len() as u32, MAX_ROWS));
        }

        let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
        if widest > MAX_COLS as usize {
            return Err(Error::ColumnOutOfBounds(widest as u32, MAX_COLS));
        }

        let width = if rows.is_empty() { 0 } else { widest.max(1) };
        for row in &mut rows {
            row.resize_with(width, GridCell::empty);
        }

        Ok(Self { rows, width })
    }

    /// Build a grid from plain text rows (no span information)
    pub fn from_text_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        Self::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(GridCell::new).collect())
                .collect(),
        )
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (identical for every row)
    pub fn col_count(&self) -> usize {
        self.width
    }

    /// Check if the grid has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<GridCell>] {
        &self.rows
    }

    /// Get a cell by 0-based position
    pub fn get(&self, row: usize, col: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Copy of the grid's text, row-major
    pub fn to_text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect())
            .collect()
    }

    /// Number of cells that declared a span
    pub fn spanning_cell_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_spanning())
            .count()
    }
}
