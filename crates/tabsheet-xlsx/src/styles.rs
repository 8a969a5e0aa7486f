//! XLSX styles (styles.xml) read/write helpers

use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tabsheet_core::{HorizontalAlignment, Style, StyleRegistry};

use crate::error::{XlsxError, XlsxResult};

// === Writing ===

/// Fonts and cell formats derived from a [`StyleRegistry`].
///
/// `cellXfs` starts with the base format at index 0; registry slot `i` is
/// written as `cellXfs` entry `i + 1`.
#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Font table; the value is the bold flag. Font 0 is the regular default.
    fonts: Vec<bool>,
    /// One resolved format per registry slot, in index order
    xfs: Vec<ResolvedXf>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXf {
    font_id: u32,
    horizontal: HorizontalAlignment,
}

impl XlsxStyleTable {
    pub(crate) fn build(registry: &StyleRegistry) -> Self {
        let mut fonts = vec![false];
        let mut xfs = Vec::with_capacity(registry.len());

        for (_, style) in registry.iter() {
            let font_id = match fonts.iter().position(|&bold| bold == style.bold) {
                Some(id) => id as u32,
                None => {
                    fonts.push(style.bold);
                    (fonts.len() - 1) as u32
                }
            };
            xfs.push(ResolvedXf {
                font_id,
                horizontal: style.horizontal,
            });
        }

        Self { fonts, xfs }
    }

    /// `cellXfs` index for a registry style id
    pub(crate) fn xf_id_for(&self, style_id: u32) -> Option<u32> {
        ((style_id as usize) < self.xfs.len()).then(|| style_id + 1)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        // Fonts
        xml.push_str(&format!("\n  <fonts count=\"{}\">", self.fonts.len()));
        for &bold in &self.fonts {
            xml.push_str("\n    <font>");
            if bold {
                xml.push_str("<b/>");
            }
            xml.push_str(r#"<sz val="11"/><name val="Calibri"/><family val="2"/></font>"#);
        }
        xml.push_str("\n  </fonts>");

        // Excel requires the first two fills to be: none and gray125
        xml.push_str(
            r#"
  <fills count="2">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
  </fills>
  <borders count="1">
    <border><left/><right/><top/><bottom/><diagonal/></border>
  </borders>
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        // cellXfs: base format, then one per registry slot
        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.xfs.len() + 1));
        xml.push_str(
            "\n    <xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>",
        );
        for xf in &self.xfs {
            let apply_font = if xf.font_id != 0 {
                " applyFont=\"1\""
            } else {
                ""
            };
            xml.push_str(&format!(
                "\n    <xf numFmtId=\"0\" fontId=\"{}\" fillId=\"0\" borderId=\"0\" xfId=\"0\"{} applyAlignment=\"1\"><alignment horizontal=\"{}\"/></xf>",
                xf.font_id,
                apply_font,
                xf.horizontal.xlsx_name()
            ));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

// === Reading ===

/// Cell formats of a styles part, indexed like `cellXfs`.
///
/// Only the properties tabsheet writes are kept: bold font and horizontal
/// alignment. Unknown alignments (e.g. `general`) read as left.
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut state = StylesState::default();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => state.open(&e, false),
            Ok(Event::Empty(e)) => state.open(&e, true),
            Ok(Event::End(e)) => state.close(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(state.cell_xfs)
}

#[derive(Default)]
struct StylesState {
    /// Bold flag per font
    fonts: Vec<bool>,
    cell_xfs: Vec<Style>,
    in_fonts: bool,
    in_font: bool,
    in_cell_xfs: bool,
}

impl StylesState {
    fn open(&mut self, e: &BytesStart<'_>, is_empty: bool) {
        match e.name().as_ref() {
            b"fonts" => self.in_fonts = !is_empty,
            b"font" if self.in_fonts => {
                self.fonts.push(false);
                self.in_font = !is_empty;
            }
            b"b" if self.in_font => {
                if let Some(last) = self.fonts.last_mut() {
                    *last = attr(e, b"val").map_or(true, |v| v != "0" && v != "false");
                }
            }
            b"cellXfs" => self.in_cell_xfs = !is_empty,
            b"xf" if self.in_cell_xfs => {
                let bold = attr(e, b"fontId")
                    .and_then(|v| v.parse::<usize>().ok())
                    .and_then(|id| self.fonts.get(id).copied())
                    .unwrap_or(false);
                self.cell_xfs.push(Style::new().bold(bold));
            }
            b"alignment" if self.in_cell_xfs => {
                if let Some(last) = self.cell_xfs.last_mut() {
                    last.horizontal = attr(e, b"horizontal")
                        .and_then(|v| HorizontalAlignment::from_xlsx_name(&v))
                        .unwrap_or_default();
                }
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"fonts" => self.in_fonts = false,
            b"font" => self.in_font = false,
            b"cellXfs" => self.in_cell_xfs = false,
            _ => {}
        }
    }
}

pub(crate) fn attr(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_and_body() -> StyleRegistry {
        let mut registry = StyleRegistry::new();
        registry.get_or_insert(
            Style::new()
                .bold(true)
                .horizontal_alignment(HorizontalAlignment::Right),
        );
        registry.get_or_insert(Style::new().horizontal_alignment(HorizontalAlignment::Right));
        registry
    }

    #[test]
    fn test_style_table_layout() {
        let table = XlsxStyleTable::build(&header_and_body());
        assert_eq!(table.fonts, vec![false, true]);
        assert_eq!(table.xf_id_for(0), Some(1));
        assert_eq!(table.xf_id_for(1), Some(2));
        assert_eq!(table.xf_id_for(2), None);

        let xml = table.to_styles_xml();
        assert!(xml.contains(r#"<fonts count="2">"#));
        assert!(xml.contains(r#"<cellXfs count="3">"#));
        assert!(xml.contains(
            r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment horizontal="right"/></xf>"#
        ));
    }

    #[test]
    fn test_styles_read_back() {
        let xml = XlsxStyleTable::build(&header_and_body()).to_styles_xml();
        let xfs = read_styles_xml(xml.as_bytes()).unwrap();

        assert_eq!(xfs.len(), 3);
        assert_eq!(xfs[0], Style::new());
        assert_eq!(
            xfs[1],
            Style::new()
                .bold(true)
                .horizontal_alignment(HorizontalAlignment::Right)
        );
        assert_eq!(
            xfs[2],
            Style::new().horizontal_alignment(HorizontalAlignment::Right)
        );
    }

    #[test]
    fn test_empty_registry() {
        let xml = XlsxStyleTable::build(&StyleRegistry::new()).to_styles_xml();
        assert!(xml.contains(r#"<fonts count="1">"#));
        assert!(xml.contains(r#"<cellXfs count="1">"#));
    }
}
