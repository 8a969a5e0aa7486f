//! Shared strings part (sharedStrings.xml)

use std::io::{BufReader, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tabsheet_core::SharedStringTable;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::{decode_cell_text, encode_cell_text};

pub(crate) fn to_shared_strings_xml(table: &SharedStringTable) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main""#,
    );
    xml.push_str(&format!(
        " count=\"{}\" uniqueCount=\"{}\">",
        table.reference_count(),
        table.len()
    ));

    for text in table.iter() {
        // Leading/trailing whitespace is dropped by readers unless preserved
        let space = if text.trim() != text {
            " xml:space=\"preserve\""
        } else {
            ""
        };
        xml.push_str(&format!(
            "\n  <si><t{}>{}</t></si>",
            space,
            encode_cell_text(text)
        ));
    }

    xml.push_str("\n</sst>");
    xml
}

/// Read all `<si>` entries; rich-text runs are concatenated
pub(crate) fn read_shared_strings_xml<R: Read>(reader: R) -> XlsxResult<Vec<String>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;
    let mut in_t = false;
    let mut in_phonetic = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"si" => {
                    in_si = true;
                    current.clear();
                }
                b"rPh" => in_phonetic = true,
                b"t" if in_si && !in_phonetic => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => strings.push(String::new()),
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"si" => {
                    strings.push(decode_cell_text(&current));
                    in_si = false;
                }
                b"rPh" => in_phonetic = false,
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_t => current.push_str(&e.unescape()?),
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
