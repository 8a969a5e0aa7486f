//! Style registry for deduplication

use super::Style;
use ahash::AHashMap;

/// Registry of distinct styles
///
/// Each distinct [`Style`] is stored once, in first-use order, and cells
/// reference it by index. Indices are never reassigned.
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    /// All unique styles, index = style id
    styles: Vec<Style>,
    /// Fast lookup for deduplication
    index_map: AHashMap<Style, u32>,
}

impl StyleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a style, returning its index
    ///
    /// If an identical style already exists, returns its index.
    /// Otherwise, adds the style and returns the new index.
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&idx) = self.index_map.get(&style) {
            return idx;
        }

        let idx = self.styles.len() as u32;
        self.index_map.insert(style, idx);
        self.styles.push(style);
        idx
    }

    /// Look up the index of a style without inserting it
    pub fn index_of(&self, style: &Style) -> Option<u32> {
        self.index_map.get(style).copied()
    }

    /// Get a style by index
    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Get the number of styles
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Iterate over all styles with their indices
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Style)> {
        self.styles.iter().enumerate().map(|(i, s)| (i as u32, s))
    }
}
