//! Cell styling types
//!
//! Formatting is limited to what an exported HTML table needs:
//! - [`Style`] - Font weight plus horizontal alignment
//! - [`HorizontalAlignment`] - Text alignment within a cell
//! - [`StyleRegistry`] - Deduplicated, indexed styles

mod registry;

pub use registry::StyleRegistry;

/// Complete cell style
///
/// Equality is structural: two cells with the same formatting resolve to the
/// same index in a [`StyleRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Bold font
    pub bold: bool,
    /// Horizontal alignment
    pub horizontal: HorizontalAlignment,
}

impl Style {
    /// Create a new default style (regular weight, left aligned)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set horizontal alignment
    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// Left aligned
    #[default]
    Left,
    /// Center aligned
    Center,
    /// Right aligned
    Right,
}

impl HorizontalAlignment {
    /// Value of the `horizontal` attribute in SpreadsheetML
    pub fn xlsx_name(self) -> &'static str {
        match self {
            HorizontalAlignment::Left => "left",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::Right => "right",
        }
    }

    /// Parse a SpreadsheetML `horizontal` attribute value
    pub fn from_xlsx_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(HorizontalAlignment::Left),
            "center" => Some(HorizontalAlignment::Center),
            "right" => Some(HorizontalAlignment::Right),
            _ => None,
        }
    }
}
