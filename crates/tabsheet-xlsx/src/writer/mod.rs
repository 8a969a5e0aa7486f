//! XLSX writer

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use tabsheet_core::{CellAddress, SpreadsheetModel};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::escape_xml;
use crate::strings::to_shared_strings_xml;
use crate::styles::XlsxStyleTable;

/// Package parts in the order they are written
pub const PART_NAMES: [&str; 7] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "xl/workbook.xml",
    "xl/_rels/workbook.xml.rels",
    "xl/styles.xml",
    "xl/sharedStrings.xml",
    "xl/worksheets/sheet1.xml",
];

/// XLSX file writer
///
/// Output is deterministic: parts are always written in [`PART_NAMES`]
/// order, deflate-compressed, with a fixed modification timestamp, so the
/// same model always produces the same bytes.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a model to a file path.
    ///
    /// The package is assembled in memory first; nothing is created at
    /// `path` if serialization fails.
    pub fn write_file<P: AsRef<Path>>(model: &SpreadsheetModel, path: P) -> XlsxResult<()> {
        let bytes = Self::to_bytes(model)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize a model to an in-memory package
    pub fn to_bytes(model: &SpreadsheetModel) -> XlsxResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        Self::write(model, &mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Write a model to a writer
    pub fn write<W: Write + Seek>(model: &SpreadsheetModel, writer: W) -> XlsxResult<()> {
        // Nothing reaches the writer unless the model is consistent
        model.validate().map_err(|e| match e {
            tabsheet_core::Error::InternalInvariantViolation(msg) => {
                XlsxError::InternalInvariantViolation(msg)
            }
            other => XlsxError::InternalInvariantViolation(other.to_string()),
        })?;

        let style_table = XlsxStyleTable::build(model.styles());
        let mut zip = ZipWriter::new(writer);

        write_part(&mut zip, PART_NAMES[0], &content_types_xml())?;
        write_part(&mut zip, PART_NAMES[1], &root_rels_xml())?;
        write_part(&mut zip, PART_NAMES[2], &workbook_xml(model))?;
        write_part(&mut zip, PART_NAMES[3], &workbook_rels_xml())?;
        write_part(&mut zip, PART_NAMES[4], &style_table.to_styles_xml())?;
        write_part(&mut zip, PART_NAMES[5], &to_shared_strings_xml(model.strings()))?;
        write_part(&mut zip, PART_NAMES[6], &worksheet_xml(model, &style_table)?)?;

        zip.finish()?;

        log::debug!(
            "wrote xlsx package: {} rows x {} cols, {} shared strings",
            model.row_count(),
            model.col_count(),
            model.strings().len()
        );
        Ok(())
    }
}

fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
}

fn write_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    content: &str,
) -> XlsxResult<()> {
    log::trace!("writing part {} ({} bytes)", name, content.len());
    zip.start_file(name, part_options())?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

fn content_types_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
</Types>"#
        .to_string()
}

fn root_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#
        .to_string()
}

fn workbook_xml(model: &SpreadsheetModel) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
        escape_xml(model.sheet_name())
    )
}

fn workbook_rels_xml() -> String {
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#
        .to_string()
}

fn worksheet_xml(model: &SpreadsheetModel, style_table: &XlsxStyleTable) -> XlsxResult<String> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
    );

    let dimension = if model.is_empty() {
        "A1".to_string()
    } else {
        let last = CellAddress::new(model.row_count() as u32 - 1, model.col_count() - 1);
        format!("A1:{}", last)
    };
    content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));

    if model.is_empty() {
        content.push_str("\n    <sheetData/>");
    } else {
        content.push_str("\n    <sheetData>");
        for row in model.rows() {
            content.push_str(&format!("\n        <row r=\"{}\">", row.index() + 1));
            for cell in row.cells() {
                let xf_id = style_table.xf_id_for(cell.style_id()).ok_or_else(|| {
                    XlsxError::InternalInvariantViolation(format!(
                        "cell {} has no cell format for style {}",
                        cell.address(),
                        cell.style_id()
                    ))
                })?;
                content.push_str(&format!(
                    "<c r=\"{}\" s=\"{}\" t=\"s\"><v>{}</v></c>",
                    cell.address(),
                    xf_id,
                    cell.string_id()
                ));
            }
            content.push_str("</row>");
        }
        content.push_str("\n    </sheetData>");
    }

    content.push_str("\n</worksheet>");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tabsheet_core::{build_model, CellGrid, SharedStringTable, Style, StyleRegistry};

    fn sample_model() -> SpreadsheetModel {
        let grid = CellGrid::from_text_rows(vec![
            vec!["Name".to_string(), "Age".to_string()],
            vec!["Ana".to_string(), "30".to_string()],
        ])
        .unwrap();
        build_model(&grid).unwrap()
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_parts_in_order() {
        let bytes = XlsxWriter::to_bytes(&sample_model()).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, PART_NAMES.to_vec());
    }

    #[test]
    fn test_output_is_deterministic() {
        let model = sample_model();
        let first = XlsxWriter::to_bytes(&model).unwrap();
        let second = XlsxWriter::to_bytes(&model).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_worksheet_cells() {
        let bytes = XlsxWriter::to_bytes(&sample_model()).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        assert!(sheet.contains(r#"<dimension ref="A1:B2"/>"#));
        assert!(sheet.contains(r#"<c r="A1" s="1" t="s"><v>0</v></c>"#));
        assert!(sheet.contains(r#"<c r="B2" s="2" t="s"><v>3</v></c>"#));

        let workbook = read_part(&bytes, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Sheet1" sheetId="1" r:id="rId1"/>"#));
    }

    #[test]
    fn test_empty_model() {
        let model = build_model(&CellGrid::default()).unwrap();
        let bytes = XlsxWriter::to_bytes(&model).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"<dimension ref="A1"/>"#));
        assert!(sheet.contains("<sheetData/>"));
    }

    #[test]
    fn test_invariant_violation_is_reported() {
        let mut styles = StyleRegistry::new();
        styles.get_or_insert(Style::new());
        let mut strings = SharedStringTable::new();
        strings.get_or_insert("a");

        // string index 5 does not exist
        let model = SpreadsheetModel::from_parts_unchecked(
            "Sheet1".to_string(),
            vec![vec![("a".to_string(), 0, 5)]],
            1,
            styles,
            strings,
        );

        let mut out = Cursor::new(Vec::new());
        let err = XlsxWriter::write(&model, &mut out).unwrap_err();
        assert!(matches!(err, XlsxError::InternalInvariantViolation(_)));
        assert!(out.get_ref().is_empty());
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        XlsxWriter::write_file(&sample_model(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, XlsxWriter::to_bytes(&sample_model()).unwrap());
    }
}
