//! HTML-to-XLSX conversion requests

use std::path::Path;

use tabsheet_core::{CellGrid, ModelOptions, SpreadsheetModel};
use tabsheet_html::{ExtractOptions, TableExtractor};
use tabsheet_xlsx::XlsxWriter;

use crate::error::ConvertResult;

/// Suggested file name of a converted workbook
pub const DEFAULT_FILE_NAME: &str = "converted.xlsx";

/// Options for a conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Table extraction options
    pub extract: ExtractOptions,
    /// Worksheet construction options (sheet name, empty-table handling, formatting)
    pub model: ModelOptions,
    /// Suggested file name for the result (default: "converted.xlsx")
    pub file_name: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            model: ModelOptions::default(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

/// A finished conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The complete `.xlsx` package
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// The grid the workbook was built from
    pub grid: CellGrid,
}

impl Conversion {
    /// MIME type of [`Conversion::bytes`]
    pub const MIME_TYPE: &'static str = tabsheet_xlsx::MIME_TYPE;

    /// Write the package to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Runs the extract, build and serialize stages for one document.
///
/// A converter holds only its options; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with the given options
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert an HTML string
    pub fn convert(&self, html: &str) -> ConvertResult<Conversion> {
        let grid = self.extractor().extract(html)?;
        self.finish(grid)
    }

    /// Convert an HTML byte buffer (UTF-8, optional BOM)
    pub fn convert_bytes(&self, bytes: &[u8]) -> ConvertResult<Conversion> {
        let grid = self.extractor().extract_bytes(bytes)?;
        self.finish(grid)
    }

    /// Read and convert an HTML file
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> ConvertResult<Conversion> {
        let grid = self.extract_file(path)?;
        self.finish(grid)
    }

    /// Read an HTML file and extract its first table without building a
    /// workbook
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> ConvertResult<CellGrid> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        if !matches!(extension.as_deref(), Some("html") | Some("htm")) {
            log::warn!(
                "{} does not look like an HTML file, reading it anyway",
                path.display()
            );
        }

        let bytes = std::fs::read(path)?;
        Ok(self.extractor().extract_bytes(&bytes)?)
    }

    fn extractor(&self) -> TableExtractor {
        TableExtractor::new(self.options.extract.clone())
    }

    fn finish(&self, grid: CellGrid) -> ConvertResult<Conversion> {
        let model = SpreadsheetModel::build(&grid, &self.options.model)?;
        let bytes = XlsxWriter::to_bytes(&model)?;

        log::debug!(
            "converted {} rows x {} cols into {} bytes",
            grid.row_count(),
            grid.col_count(),
            bytes.len()
        );

        Ok(Conversion {
            bytes,
            file_name: self.options.file_name.clone(),
            grid,
        })
    }
}

/// Convert an HTML string with default options
pub fn convert(html: &str) -> ConvertResult<Conversion> {
    Converter::default().convert(html)
}
