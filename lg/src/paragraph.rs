//! Paragraph segmentation
//!
//! A paragraph is a maximal run of text between blank lines. Pieces that are
//! blank after trimming never make it into the sequence, so they take no
//! index and never show up as a neighbour.

use std::sync::LazyLock;

use regex::Regex;

/// A newline, any whitespace (including more newlines), then a newline
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").expect("static regex is valid"));

/// Split text into trimmed, non-empty paragraphs in document order
pub fn segment(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// An ordered paragraph sequence with neighbour lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraphs {
    items: Vec<String>,
}

impl Paragraphs {
    /// Segment `text` into paragraphs
    pub fn from_text(text: &str) -> Self {
        Self { items: segment(text) }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Paragraph immediately preceding `index`, if any
    pub fn before(&self, index: usize) -> Option<&str> {
        index.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Paragraph immediately following `index`, if any
    pub fn after(&self, index: usize) -> Option<&str> {
        index.checked_add(1).and_then(|i| self.get(i))
    }
}
