//! Shared string table

use ahash::AHashMap;
use std::sync::Arc;

/// Insertion-ordered table of distinct cell texts
///
/// Every distinct text gets a stable index on first use; later lookups of the
/// same text return that index. Total references are counted as well, since
/// the `<sst>` element records both figures.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    strings: Vec<Arc<str>>,
    index_map: AHashMap<Arc<str>, u32>,
    references: u64,
}

impl SharedStringTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the index for a text and count one reference to it
    pub fn get_or_insert(&mut self, text: &str) -> u32 {
        self.references += 1;
        if let Some(&idx) = self.index_map.get(text) {
            return idx;
        }

        let idx = self.strings.len() as u32;
        let shared: Arc<str> = Arc::from(text);
        self.index_map.insert(shared.clone(), idx);
        self.strings.push(shared);
        idx
    }

    /// Look up the index of a text without inserting it
    pub fn index_of(&self, text: &str) -> Option<u32> {
        self.index_map.get(text).copied()
    }

    /// Get a text by index
    pub fn get(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(|s| &**s)
    }

    /// Number of distinct texts
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Number of `get_or_insert` calls, i.e. cells referencing the table
    pub fn reference_count(&self) -> u64 {
        self.references
    }

    /// Iterate over texts in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|s| &**s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_interning() {
        let mut table = SharedStringTable::new();

        let a = table.get_or_insert("hello");
        let b = table.get_or_insert("world");
        let c = table.get_or_insert("hello");
        let empty = table.get_or_insert("");

        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(empty, 2);
        assert_eq!(table.len(), 3);
        assert_eq!(table.reference_count(), 4);
        assert_eq!(table.get(1), Some("world"));
        assert_eq!(table.get(3), None);
        assert_eq!(table.index_of(""), Some(2));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["hello", "world", ""]);
    }

    proptest! {
        #[test]
        fn prop_equal_texts_share_an_index(texts in proptest::collection::vec("[a-c]{0,2}", 0..40)) {
            let mut table = SharedStringTable::new();
            let ids: Vec<u32> = texts.iter().map(|t| table.get_or_insert(t)).collect();

            for (i, a) in texts.iter().enumerate() {
                for (j, b) in texts.iter().enumerate() {
                    prop_assert_eq!(a == b, ids[i] == ids[j]);
                }
            }
            for (text, id) in texts.iter().zip(&ids) {
                prop_assert_eq!(table.get(*id), Some(text.as_str()));
            }
        }
    }
}
