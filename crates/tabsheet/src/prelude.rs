//! Prelude module - common imports for tabsheet users
//!
//! ```rust
//! use tabsheet::prelude::*;
//! ```

pub use crate::{
    // Pipeline
    Conversion,
    ConvertError,
    ConvertOptions,
    Converter,

    // Grid and model
    CellGrid,
    EmptyGridPolicy,
    ExtractOptions,
    HorizontalAlignment,
    ModelOptions,
    Style,
    WhitespaceMode,

    // I/O types
    XlsxReader,
    XlsxWriter,
};
