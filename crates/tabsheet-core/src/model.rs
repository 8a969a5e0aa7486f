//! Worksheet model built from a [`CellGrid`]

use crate::cell::{Cell, Row};
use crate::error::{Error, Result};
use crate::grid::CellGrid;
use crate::strings::SharedStringTable;
use crate::style::{HorizontalAlignment, Style, StyleRegistry};
use crate::MAX_SHEET_NAME_LEN;

/// Name of the single worksheet unless configured otherwise
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// What to do with a table that has no rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyGridPolicy {
    /// Build a worksheet with zero rows
    #[default]
    EmptyWorksheet,
    /// Refuse with [`Error::EmptyGrid`]
    Fail,
}

/// Formatting applied to cells by row position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingPolicy {
    /// Render the first row in bold
    pub header_bold: bool,
    /// Horizontal alignment of every cell
    pub horizontal: HorizontalAlignment,
}

impl Default for FormattingPolicy {
    fn default() -> Self {
        Self {
            header_bold: true,
            horizontal: HorizontalAlignment::Right,
        }
    }
}

impl FormattingPolicy {
    /// Style for every cell of the given row
    pub fn style_for(&self, row: u32) -> Style {
        Style::new()
            .bold(self.header_bold && row == 0)
            .horizontal_alignment(self.horizontal)
    }
}

/// Options for building a [`SpreadsheetModel`]
#[derive(Debug, Clone)]
pub struct ModelOptions {
    /// Worksheet name (default: "Sheet1")
    pub sheet_name: String,
    /// Handling of tables without rows
    pub empty_grid: EmptyGridPolicy,
    /// Cell formatting rule
    pub formatting: FormattingPolicy,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            empty_grid: EmptyGridPolicy::default(),
            formatting: FormattingPolicy::default(),
        }
    }
}

/// A single worksheet: rows of styled cells plus the style and string tables
/// the cells index into.
#[derive(Debug, Clone)]
pub struct SpreadsheetModel {
    sheet_name: String,
    rows: Vec<Row>,
    col_count: u16,
    styles: StyleRegistry,
    strings: SharedStringTable,
}

impl SpreadsheetModel {
    /// Build a model from a grid in a single pass.
    ///
    /// Every cell gets its style from `options.formatting` and its text
    /// interned in the shared string table.
    pub fn build(grid: &CellGrid, options: &ModelOptions) -> Result<Self> {
        validate_sheet_name(&options.sheet_name)?;

        if grid.is_empty() && options.empty_grid == EmptyGridPolicy::Fail {
            return Err(Error::EmptyGrid);
        }

        let mut styles = StyleRegistry::new();
        let mut strings = SharedStringTable::new();
        let mut rows = Vec::with_capacity(grid.row_count());

        for (r, grid_row) in grid.rows().iter().enumerate() {
            let r = r as u32;
            let style_id = styles.get_or_insert(options.formatting.style_for(r));

            let cells = grid_row
                .iter()
                .enumerate()
                .map(|(c, grid_cell)| {
                    let string_id = strings.get_or_insert(&grid_cell.text);
                    Cell::new(grid_cell.text.clone(), r, c as u16, style_id, string_id)
                })
                .collect();

            rows.push(Row::new(r, cells));
        }

        log::debug!(
            "built worksheet model '{}': {} rows x {} cols, {} styles, {} unique strings",
            options.sheet_name,
            rows.len(),
            grid.col_count(),
            styles.len(),
            strings.len()
        );

        Ok(Self {
            sheet_name: options.sheet_name.clone(),
            rows,
            col_count: grid.col_count() as u16,
            styles,
            strings,
        })
    }

    /// Worksheet name
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (identical for every row)
    pub fn col_count(&self) -> u16 {
        self.col_count
    }

    /// Check if the worksheet has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by 0-based position
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.rows.get(row as usize).and_then(|r| r.get(col))
    }

    /// Iterate over all cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|r| r.cells().iter())
    }

    /// Resolved style of a cell
    pub fn style_of(&self, cell: &Cell) -> Option<&Style> {
        self.styles.get(cell.style_id())
    }

    /// The style registry
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    /// The shared string table
    pub fn strings(&self) -> &SharedStringTable {
        &self.strings
    }

    /// Check the structural invariants that serialization depends on:
    /// uniform row length, gap-free indices, and in-range style and string
    /// references.
    pub fn validate(&self) -> Result<()> {
        validate_sheet_name(&self.sheet_name)?;

        if !self.rows.is_empty() && self.col_count == 0 {
            return Err(Error::invariant("non-empty worksheet has zero columns"));
        }

        for (r, row) in self.rows.iter().enumerate() {
            if row.index() as usize != r {
                return Err(Error::invariant(format!(
                    "row at position {} has index {}",
                    r,
                    row.index()
                )));
            }
            if row.len() != self.col_count as usize {
                return Err(Error::invariant(format!(
                    "row {} has {} cells, expected {}",
                    r,
                    row.len(),
                    self.col_count
                )));
            }

            for (c, cell) in row.cells().iter().enumerate() {
                if cell.row_index() != row.index() || cell.col_index() as usize != c {
                    return Err(Error::invariant(format!(
                        "cell {} is stored at row {} column {}",
                        cell.address(),
                        r,
                        c
                    )));
                }
                if self.styles.get(cell.style_id()).is_none() {
                    return Err(Error::invariant(format!(
                        "cell {} references style {} of {}",
                        cell.address(),
                        cell.style_id(),
                        self.styles.len()
                    )));
                }
                match self.strings.get(cell.string_id()) {
                    Some(text) if text == cell.text() => {}
                    Some(_) => {
                        return Err(Error::invariant(format!(
                            "cell {} text differs from shared string {}",
                            cell.address(),
                            cell.string_id()
                        )))
                    }
                    None => {
                        return Err(Error::invariant(format!(
                            "cell {} references shared string {} of {}",
                            cell.address(),
                            cell.string_id(),
                            self.strings.len()
                        )))
                    }
                }
            }
        }

        Ok(())
    }

    /// Assemble a model from parts without any checks.
    ///
    /// Only for exercising the serializer's invariant checks.
    #[doc(hidden)]
    pub fn from_parts_unchecked(
        sheet_name: String,
        rows: Vec<Vec<(String, u32, u32)>>,
        col_count: u16,
        styles: StyleRegistry,
        strings: SharedStringTable,
    ) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(r, cells)| {
                let cells = cells
                    .into_iter()
                    .enumerate()
                    .map(|(c, (text, style_id, string_id))| {
                        Cell::new(text, r as u32, c as u16, style_id, string_id)
                    })
                    .collect();
                Row::new(r as u32, cells)
            })
            .collect();

        Self {
            sheet_name,
            rows,
            col_count,
            styles,
            strings,
        }
    }
}

/// Build a model with default options
pub fn build_model(grid: &CellGrid) -> Result<SpreadsheetModel> {
    SpreadsheetModel::build(grid, &ModelOptions::default())
}

/// Validate a worksheet name against the SpreadsheetML rules
pub fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        )));
    }

    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    for c in INVALID_CHARS {
        if name.contains(*c) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(Error::InvalidSheetName(
            "Sheet name cannot start or end with an apostrophe".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridCell;
    use pretty_assertions::assert_eq;

    fn grid(rows: &[&[&str]]) -> CellGrid {
        CellGrid::from_text_rows(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_header_row_is_bold_and_all_right_aligned() {
        let model =
            build_model(&grid(&[&["Name", "Age"], &["Ana", "30"], &["Bo", "41"]])).unwrap();

        let header = Style::new()
            .bold(true)
            .horizontal_alignment(HorizontalAlignment::Right);
        let body = Style::new().horizontal_alignment(HorizontalAlignment::Right);

        assert_eq!(model.styles().len(), 2);
        for cell in model.cells() {
            let expected = if cell.row_index() == 0 { header } else { body };
            assert_eq!(model.style_of(cell), Some(&expected));
        }
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_cells_share_string_ids() {
        let model = build_model(&grid(&[&["x", "y"], &["y", "x"], &["", ""]])).unwrap();

        let a1 = model.cell(0, 0).unwrap();
        let b2 = model.cell(1, 1).unwrap();
        assert_eq!(a1.string_id(), b2.string_id());
        assert_eq!(model.strings().len(), 3);
        assert_eq!(model.strings().reference_count(), 6);
        assert_eq!(model.cell(2, 1).unwrap().text(), "");
        assert_eq!(b2.address().to_string(), "B2");
    }

    #[test]
    fn test_empty_grid_policy() {
        let empty = CellGrid::new(Vec::new()).unwrap();

        let model = build_model(&empty).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.col_count(), 0);
        assert!(model.validate().is_ok());

        let options = ModelOptions {
            empty_grid: EmptyGridPolicy::Fail,
            ..Default::default()
        };
        assert!(matches!(
            SpreadsheetModel::build(&empty, &options),
            Err(Error::EmptyGrid)
        ));
    }

    #[test]
    fn test_custom_formatting_policy() {
        let options = ModelOptions {
            formatting: FormattingPolicy {
                header_bold: false,
                horizontal: HorizontalAlignment::Center,
            },
            ..Default::default()
        };
        let model = SpreadsheetModel::build(&grid(&[&["a"], &["b"]]), &options).unwrap();
        assert_eq!(model.styles().len(), 1);
    }

    #[test]
    fn test_spans_do_not_change_layout() {
        let rows = vec![
            vec![GridCell::new("wide").with_spans(1, 2)],
            vec![GridCell::new("a"), GridCell::new("b")],
        ];
        let model = build_model(&CellGrid::new(rows).unwrap()).unwrap();
        assert_eq!(model.col_count(), 2);
        assert_eq!(model.cell(0, 1).unwrap().text(), "");
    }

    #[test]
    fn test_sheet_name_validation() {
        assert!(validate_sheet_name("Sheet1").is_ok());
        assert!(validate_sheet_name("Données 2024").is_ok());
        assert!(validate_sheet_name("").is_err());
        assert!(validate_sheet_name("a/b").is_err());
        assert!(validate_sheet_name("'quoted'").is_err());
        assert!(validate_sheet_name(&"x".repeat(32)).is_err());
    }

    #[test]
    fn test_validate_detects_bad_references() {
        let mut styles = StyleRegistry::new();
        styles.get_or_insert(Style::new());
        let mut strings = SharedStringTable::new();
        strings.get_or_insert("a");

        let model = SpreadsheetModel::from_parts_unchecked(
            DEFAULT_SHEET_NAME.into(),
            vec![vec![("a".into(), 3, 0)]],
            1,
            styles,
            strings,
        );
        assert!(matches!(
            model.validate(),
            Err(Error::InternalInvariantViolation(_))
        ));
    }
}
