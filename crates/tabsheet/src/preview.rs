//! Plain-text preview of an extracted grid

use tabsheet_core::CellGrid;

/// Render a grid as tab-separated lines, one per row.
///
/// Tabs and line breaks inside cell text are shown as spaces so every row
/// stays on a single line.
pub fn preview_text(grid: &CellGrid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| cell.text.replace(['\t', '\r', '\n'], " "))
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        let grid = CellGrid::from_text_rows(vec![
            vec!["Name".into(), "Age".into()],
            vec!["Ana\tB".into()],
        ])
        .unwrap();
        assert_eq!(preview_text(&grid), "Name\tAge\nAna B\t\n");
        assert_eq!(preview_text(&CellGrid::default()), "");
    }
}
