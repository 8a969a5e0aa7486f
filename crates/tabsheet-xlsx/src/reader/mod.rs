//! XLSX reader
//!
//! Loads the first worksheet of a package: cell text, bold and horizontal
//! alignment. This is enough to check what [`XlsxWriter`](crate::XlsxWriter)
//! produced, or to preview a workbook written by another application.

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use tabsheet_core::{CellAddress, Style};

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_cell_text;
use crate::strings::read_shared_strings_xml;
use crate::styles::{attr, read_styles_xml};

const CONTENT_TYPES: &str = "[Content_Types].xml";
const WORKBOOK: &str = "xl/workbook.xml";
const WORKBOOK_RELS: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS: &str = "xl/sharedStrings.xml";
const STYLES: &str = "xl/styles.xml";

/// Largest dense grid [`SheetContents::to_text_rows`] builds
pub const MAX_TEXT_GRID_CELLS: usize = 1 << 22;

/// A cell loaded from a worksheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadCell {
    /// Cell position
    pub address: CellAddress,
    /// Cell text (shared, inline or raw value)
    pub text: String,
    /// Resolved cell format
    pub style: Style,
}

/// Contents of the first worksheet of a package
#[derive(Debug, Clone, Default)]
pub struct SheetContents {
    /// Worksheet name from the workbook part
    pub sheet_name: String,
    /// Archive entries in central-directory order
    pub part_names: Vec<String>,
    /// Cells in document order
    pub cells: Vec<ReadCell>,
}

impl SheetContents {
    /// Look up a cell by A1 reference (e.g. "B2")
    pub fn cell(&self, a1: &str) -> Option<&ReadCell> {
        let address = CellAddress::parse(a1).ok()?;
        self.cells.iter().find(|c| c.address == address)
    }

    /// Number of rows up to the last stored cell
    pub fn row_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.address.row as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of columns up to the rightmost stored cell
    pub fn col_count(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.address.col as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Cell text as a dense grid; positions without a cell are empty strings.
    ///
    /// The grid spans A1 to the furthest stored cell, so a sparse sheet can
    /// ask for far more cells than it stores. Grids larger than
    /// [`MAX_TEXT_GRID_CELLS`] are refused.
    pub fn to_text_rows(&self) -> XlsxResult<Vec<Vec<String>>> {
        let (row_count, col_count) = (self.row_count(), self.col_count());
        if row_count.saturating_mul(col_count) > MAX_TEXT_GRID_CELLS {
            return Err(XlsxError::InvalidFormat(format!(
                "sheet spans {} rows x {} columns, more than {} cells",
                row_count, col_count, MAX_TEXT_GRID_CELLS
            )));
        }

        let mut rows = vec![vec![String::new(); col_count]; row_count];
        for cell in &self.cells {
            rows[cell.address.row as usize][cell.address.col as usize] = cell.text.clone();
        }
        Ok(rows)
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read the first worksheet of a file
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<SheetContents> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read the first worksheet of an in-memory package
    pub fn read_bytes(bytes: &[u8]) -> XlsxResult<SheetContents> {
        Self::read(Cursor::new(bytes))
    }

    /// Read the first worksheet from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<SheetContents> {
        let mut archive = zip::ZipArchive::new(reader)?;

        let mut part_names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            part_names.push(archive.by_index(i)?.name().to_string());
        }

        if !part_names.iter().any(|name| name == CONTENT_TYPES) {
            return Err(XlsxError::MissingPart(CONTENT_TYPES.into()));
        }

        let (sheet_name, r_id) = Self::read_first_sheet(&mut archive)?;
        let sheet_path = Self::resolve_sheet_path(&mut archive, &r_id)?;

        let shared_strings = match archive.by_name(SHARED_STRINGS) {
            Ok(file) => read_shared_strings_xml(file)?,
            Err(_) => Vec::new(),
        };
        let cell_styles = match archive.by_name(STYLES) {
            Ok(file) => read_styles_xml(file)?,
            Err(_) => Vec::new(),
        };

        let file = archive
            .by_name(&sheet_path)
            .map_err(|_| XlsxError::MissingPart(sheet_path.clone()))?;
        let cells = read_worksheet_cells(file, &shared_strings, &cell_styles)?;

        log::debug!(
            "read worksheet '{}' from {}: {} cells",
            sheet_name,
            sheet_path,
            cells.len()
        );

        Ok(SheetContents {
            sheet_name,
            part_names,
            cells,
        })
    }

    /// Name and relationship id of the first `<sheet>` in the workbook part
    fn read_first_sheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<(String, String)> {
        let file = archive
            .by_name(WORKBOOK)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = attr(&e, b"name");
                    let r_id = attr(&e, b"r:id");
                    return match (name, r_id) {
                        (Some(name), Some(r_id)) => Ok((name, r_id)),
                        _ => Err(XlsxError::InvalidFormat(
                            "sheet element without name or r:id".into(),
                        )),
                    };
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Err(XlsxError::InvalidFormat("workbook has no sheets".into()))
    }

    /// Archive path of the worksheet a workbook relationship points to
    fn resolve_sheet_path<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        r_id: &str,
    ) -> XlsxResult<String> {
        let file = archive
            .by_name(WORKBOOK_RELS)
            .map_err(|_| XlsxError::MissingPart(WORKBOOK_RELS.into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    if attr(&e, b"Id").as_deref() == Some(r_id) {
                        let target = attr(&e, b"Target").ok_or_else(|| {
                            XlsxError::InvalidFormat(format!("relationship {} has no target", r_id))
                        })?;
                        return Ok(match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("xl/{}", target),
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Err(XlsxError::MissingPart(format!(
            "worksheet relationship {}",
            r_id
        )))
    }
}

fn read_worksheet_cells<R: Read>(
    reader: R,
    shared_strings: &[String],
    cell_styles: &[Style],
) -> XlsxResult<Vec<ReadCell>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut cells = Vec::new();

    // Position of the previous row/cell, for elements without an `r`
    let mut row: u32 = 0;
    let mut next_row: u32 = 0;
    let mut next_col: u16 = 0;

    let mut current: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline_text = false;

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"row" => {
                    row = row_number(&e).unwrap_or(next_row);
                    next_row = row + 1;
                    next_col = 0;
                }
                b"c" => {
                    let pending = PendingCell::start(&e, row, next_col)?;
                    next_col = pending.address.col.saturating_add(1);
                    current = Some(pending);
                }
                b"v" if current.is_some() => in_value = true,
                b"t" if current.is_some() => in_inline_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"row" => {
                    row = row_number(&e).unwrap_or(next_row);
                    next_row = row + 1;
                }
                b"c" => {
                    let pending = PendingCell::start(&e, row, next_col)?;
                    next_col = pending.address.col.saturating_add(1);
                    cells.push(pending.finish(shared_strings, cell_styles)?);
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if let Some(pending) = current.as_mut() {
                    if in_value || in_inline_text {
                        pending.text.push_str(&e.unescape()?);
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"v" => in_value = false,
                b"t" => in_inline_text = false,
                b"c" => {
                    if let Some(pending) = current.take() {
                        cells.push(pending.finish(shared_strings, cell_styles)?);
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(cells)
}

fn row_number(e: &quick_xml::events::BytesStart<'_>) -> Option<u32> {
    attr(e, b"r")
        .and_then(|r| r.parse::<u32>().ok())
        .and_then(|r| r.checked_sub(1))
}

/// A `<c>` element whose content is still being read
struct PendingCell {
    address: CellAddress,
    cell_type: Option<String>,
    style_index: Option<usize>,
    text: String,
}

impl PendingCell {
    fn start(e: &quick_xml::events::BytesStart<'_>, row: u32, col: u16) -> XlsxResult<Self> {
        let address = match attr(e, b"r") {
            Some(r) => CellAddress::parse(&r)?,
            None => CellAddress::new(row, col),
        };
        Ok(Self {
            address,
            cell_type: attr(e, b"t"),
            style_index: attr(e, b"s").and_then(|s| s.parse().ok()),
            text: String::new(),
        })
    }

    fn finish(self, shared_strings: &[String], cell_styles: &[Style]) -> XlsxResult<ReadCell> {
        let text = match self.cell_type.as_deref() {
            Some("s") => {
                let index: usize = self.text.trim().parse().map_err(|_| {
                    XlsxError::InvalidFormat(format!(
                        "cell {} has shared string index '{}'",
                        self.address, self.text
                    ))
                })?;
                shared_strings.get(index).cloned().ok_or_else(|| {
                    XlsxError::InvalidFormat(format!(
                        "cell {} references shared string {} of {}",
                        self.address,
                        index,
                        shared_strings.len()
                    ))
                })?
            }
            Some("inlineStr") => decode_cell_text(&self.text),
            _ => self.text,
        };

        let style = cell_styles
            .get(self.style_index.unwrap_or(0))
            .copied()
            .unwrap_or_default();

        Ok(ReadCell {
            address: self.address,
            text,
            style,
        })
    }
}
