//! Extraction options

/// How whitespace inside cell text is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WhitespaceMode {
    /// Trim, then collapse internal whitespace runs to a single space
    #[default]
    Collapse,
    /// Only trim leading and trailing whitespace
    Trim,
}

/// Options for extracting a table
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Cell text normalization (default: collapse)
    pub whitespace: WhitespaceMode,
}

impl WhitespaceMode {
    /// Normalize raw cell text
    pub fn apply(self, raw: &str) -> String {
        match self {
            WhitespaceMode::Trim => raw.trim().to_string(),
            WhitespaceMode::Collapse => raw.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_modes() {
        let raw = "\n   Total\t  due \n ";
        assert_eq!(WhitespaceMode::Collapse.apply(raw), "Total due");
        assert_eq!(WhitespaceMode::Trim.apply(raw), "Total\t  due");
        assert_eq!(WhitespaceMode::Collapse.apply("   "), "");
    }
}
