//! First-table extraction

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink};
use tabsheet_core::{CellGrid, GridCell};

use crate::error::{ExtractionError, ExtractionResult};
use crate::options::ExtractOptions;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Extracts the first `<table>` of a document into a [`CellGrid`]
///
/// Rows follow the order of the DOM `table.rows` collection: rows of
/// `<thead>` groups, then rows directly under the table or in `<tbody>`
/// groups, then rows of `<tfoot>` groups. Rows of nested tables belong to
/// the nested table, although their text still counts toward the enclosing
/// cell.
///
/// The document is parsed with scripting disabled, so `<noscript>` content
/// is markup, and tables inside `<template>` content are never selected.
#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    options: ExtractOptions,
}

impl TableExtractor {
    /// Create an extractor with the given options
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract the first table of an HTML string
    pub fn extract(&self, html: &str) -> ExtractionResult<CellGrid> {
        let document = parse_document(html);
        if !document.errors.is_empty() {
            log::debug!(
                "recovered from {} HTML parse errors (first: {})",
                document.errors.len(),
                document.errors[0]
            );
        }

        let table = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "table" && !in_template(*el))
            .ok_or(ExtractionError::NoTableFound)?;

        let rows: Vec<Vec<GridCell>> = table_rows(table)
            .into_iter()
            .map(|row| self.row_cells(row))
            .collect();

        let grid = CellGrid::new(rows).map_err(|e| {
            ExtractionError::MalformedMarkup(format!(
                "table cannot be represented as a worksheet: {}",
                e
            ))
        })?;

        log::debug!(
            "extracted table: {} rows x {} cols ({} cells with spans)",
            grid.row_count(),
            grid.col_count(),
            grid.spanning_cell_count()
        );

        Ok(grid)
    }

    /// Extract the first table of an HTML byte buffer.
    ///
    /// The buffer must be UTF-8; a leading byte order mark is skipped.
    pub fn extract_bytes(&self, bytes: &[u8]) -> ExtractionResult<CellGrid> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let html = std::str::from_utf8(bytes).map_err(|e| {
            ExtractionError::MalformedMarkup(format!("input is not valid UTF-8: {}", e))
        })?;
        self.extract(html)
    }

    fn row_cells(&self, row: ElementRef<'_>) -> Vec<GridCell> {
        child_elements(row)
            .filter(|el| matches!(el.value().name(), "td" | "th"))
            .map(|cell| {
                let raw: String = cell.text().collect();
                GridCell::new(self.options.whitespace.apply(&raw))
                    .with_spans(span_attr(cell, "rowspan"), span_attr(cell, "colspan"))
            })
            .collect()
    }
}

/// Extract the first table with default options
pub fn extract_table(html: &str) -> ExtractionResult<CellGrid> {
    TableExtractor::default().extract(html)
}

fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

fn in_template(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().name() == "template")
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut head = Vec::new();
    let mut body = Vec::new();
    let mut foot = Vec::new();

    for child in child_elements(table) {
        match child.value().name() {
            "tr" => body.push(child),
            "thead" => head.extend(group_rows(child)),
            "tbody" => body.extend(group_rows(child)),
            "tfoot" => foot.extend(group_rows(child)),
            _ => {}
        }
    }

    head.extend(body);
    head.extend(foot);
    head
}

fn group_rows(group: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    child_elements(group).filter(|el| el.value().name() == "tr")
}

fn span_attr(cell: ElementRef<'_>, name: &str) -> u32 {
    cell.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WhitespaceMode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn texts(grid: &CellGrid) -> Vec<Vec<String>> {
        grid.to_text_rows()
    }

    fn rows(expected: &[&[&str]]) -> Vec<Vec<String>> {
        expected
            .iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_simple_table() {
        let grid = extract_table(
            "<table><tr><td>Name</td><td>Age</td></tr><tr><td>Ana</td><td>30</td></tr></table>",
        )
        .unwrap();
        assert_eq!(texts(&grid), rows(&[&["Name", "Age"], &["Ana", "30"]]));
    }

    #[test]
    fn test_no_table() {
        let err = extract_table("<html><body><p>nothing here</p></body></html>").unwrap_err();
        assert!(matches!(err, ExtractionError::NoTableFound));
        assert!(matches!(extract_table(""), Err(ExtractionError::NoTableFound)));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = extract_table(
            "<table><tr><td>a</td><td>b</td></tr><tr><td>OnlyOne</td></tr></table>",
        )
        .unwrap();
        assert_eq!(texts(&grid), rows(&[&["a", "b"], &["OnlyOne", ""]]));
    }

    #[test]
    fn test_unclosed_tags_are_recovered() {
        let grid =
            extract_table("<table><tr><td>a<td>b<tr><td>c</table><p>after").unwrap();
        assert_eq!(texts(&grid), rows(&[&["a", "b"], &["c", ""]]));
    }

    #[test]
    fn test_sections_follow_dom_row_order() {
        let html = r#"
            <table>
              <tfoot><tr><td>total</td></tr></tfoot>
              <tbody><tr><td>body</td></tr></tbody>
              <thead><tr><th>head</th></tr></thead>
            </table>"#;
        let grid = extract_table(html).unwrap();
        assert_eq!(texts(&grid), rows(&[&["head"], &["body"], &["total"]]));
    }

    #[test]
    fn test_only_first_table_and_no_nested_rows() {
        let html = r#"
            <div>
              <table id="first">
                <tr><td>outer <table><tr><td>inner</td></tr></table></td><td>x</td></tr>
              </table>
              <table id="second"><tr><td>ignored</td></tr></table>
            </div>"#;
        let grid = extract_table(html).unwrap();
        assert_eq!(texts(&grid), rows(&[&["outer inner", "x"]]));
    }

    #[test]
    fn test_template_content_is_skipped() {
        let html = "<template><table><tr><td>HIDDEN</td></tr></table></template>\
                    <table><tr><td>REAL</td></tr></table>";
        let grid = extract_table(html).unwrap();
        assert_eq!(texts(&grid), rows(&[&["REAL"]]));

        let err = extract_table("<template><table><tr><td>x</td></tr></table></template>")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoTableFound));
    }

    #[test]
    fn test_noscript_table_is_markup() {
        let grid = extract_table(
            "<html><body><noscript><table><tr><td>NS</td></tr></table></noscript></body></html>",
        )
        .unwrap();
        assert_eq!(texts(&grid), rows(&[&["NS"]]));

        let grid =
            extract_table("<noscript><table><tr><td>NS</td></tr></table></noscript>").unwrap();
        assert_eq!(texts(&grid), rows(&[&["NS"]]));
    }

    #[test]
    fn test_text_is_concatenated_and_decoded() {
        let grid = extract_table(
            "<table><tr><td> <b>Fish</b> &amp;\n  <i>Chips</i> </td><th>&lt;tag&gt;</th></tr></table>",
        )
        .unwrap();
        assert_eq!(texts(&grid), rows(&[&["Fish & Chips", "<tag>"]]));
    }

    #[test]
    fn test_trim_only_mode() {
        let extractor = TableExtractor::new(ExtractOptions {
            whitespace: WhitespaceMode::Trim,
        });
        let grid = extractor
            .extract("<table><tr><td>  a   b  </td></tr></table>")
            .unwrap();
        assert_eq!(texts(&grid), rows(&[&["a   b"]]));
    }

    #[test]
    fn test_spans_are_read_not_expanded() {
        let grid = extract_table(
            r#"<table>
                 <tr><td colspan="2">wide</td></tr>
                 <tr><td rowspan=" 3 ">tall</td><td>b</td></tr>
                 <tr><td colspan="abc">bad</td></tr>
               </table>"#,
        )
        .unwrap();
        assert_eq!(grid.col_count(), 2);
        assert_eq!(texts(&grid), rows(&[&["wide", ""], &["tall", "b"], &["bad", ""]]));
        assert_eq!(grid.get(0, 0).unwrap().col_span, 2);
        assert_eq!(grid.get(1, 0).unwrap().row_span, 3);
        assert_eq!(grid.get(2, 0).unwrap().col_span, 1);
        assert_eq!(grid.spanning_cell_count(), 2);
    }

    #[test]
    fn test_empty_table() {
        let grid = extract_table("<table></table>").unwrap();
        assert!(grid.is_empty());

        let grid = extract_table("<table><tr></tr></table>").unwrap();
        assert_eq!(grid.row_count(), 1);
        assert_eq!(grid.col_count(), 1);
    }

    #[test]
    fn test_bytes_input() {
        let extractor = TableExtractor::default();
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("<table><tr><td>Größe</td></tr></table>".as_bytes());
        let grid = extractor.extract_bytes(&bytes).unwrap();
        assert_eq!(texts(&grid), rows(&[&["Größe"]]));

        let err = extractor.extract_bytes(&[0x3c, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, ExtractionError::MalformedMarkup(_)));
    }

    proptest! {
        #[test]
        fn prop_regular_table_shape(r in 1usize..8, c in 1usize..8) {
            let mut html = String::from("<table>");
            for i in 0..r {
                html.push_str("<tr>");
                for j in 0..c {
                    html.push_str(&format!("<td>{}-{}</td>", i, j));
                }
                html.push_str("</tr>");
            }
            html.push_str("</table>");

            let grid = extract_table(&html).unwrap();
            prop_assert_eq!(grid.row_count(), r);
            prop_assert_eq!(grid.col_count(), c);
            prop_assert_eq!(
                grid.get(r - 1, c - 1).map(|g| g.text.clone()),
                Some(format!("{}-{}", r - 1, c - 1))
            );
        }
    }
}
