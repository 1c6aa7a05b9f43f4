//! Live search over the item list.
//!
//! Each item gets a precomputed haystack: English name, Chinese name and slug
//! concatenated, lowercased and stripped of whitespace. A query is normalized
//! the same way and matched by substring containment, so `"Kiana Kas"`,
//! `"kianakas"` and `"琪亚"` all find Kiana.

use crate::types::Item;

/// Lowercase and drop all whitespace.
///
/// Matches the page script's `toLowerCase().replace(/\s+/g, '')`, since the
/// browser compares its normalized query against haystacks built here.
pub fn normalize(s: &str) -> String {
    // Lowercase before stripping: a sigma ending a word becomes ς
    s.to_lowercase()
        .chars()
        .filter(|&c| !is_script_whitespace(c))
        .collect()
}

/// JavaScript's `\s`: Unicode whitespace plus U+FEFF, minus U+0085.
fn is_script_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// An item with its normalized search string.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub item: Item,
    pub haystack: String,
}

impl IndexEntry {
    pub fn new(item: Item) -> Self {
        let haystack = normalize(&format!(
            "{}{}{}",
            item.en,
            item.secondary_name().unwrap_or_default(),
            item.slug
        ));
        Self { item, haystack }
    }

    /// True when the already-normalized query occurs in the haystack.
    pub fn matches(&self, normalized_query: &str) -> bool {
        self.haystack.contains(normalized_query)
    }
}

/// One entry per item, in source order. Built once per load.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn build(items: Vec<Item>) -> Self {
        Self {
            entries: items.into_iter().map(IndexEntry::new).collect(),
        }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions of entries matching `query`, in original order.
    ///
    /// An empty (or all-whitespace) query matches everything.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        let q = normalize(query);
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.matches(&q))
            .map(|(pos, _)| pos)
            .collect()
    }
}
