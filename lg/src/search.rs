//! Paragraph search over a loaded corpus
//!
//! The search term is compiled as a case-insensitive regular expression, so
//! characters like `.`, `*` or `(` keep their regex meaning. `warrant.`
//! matches `warranty`, and `(c)` matches a bare `c`. Callers that want a
//! plain substring search use [`MatchMode::Literal`].

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::Corpus;
use crate::error::SearchError;

/// How a search term is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Term is a regular expression
    #[default]
    Pattern,
    /// Term is matched as plain text
    Literal,
}

/// A compiled, case-insensitive search pattern
#[derive(Debug, Clone)]
pub struct SearchPattern {
    term: String,
    mode: MatchMode,
    regex: Regex,
}

impl SearchPattern {
    /// Compile a search term
    ///
    /// Surrounding whitespace is ignored. A blank term is rejected.
    pub fn compile(term: &str, mode: MatchMode) -> Result<Self, SearchError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let source = match mode {
            MatchMode::Pattern => term.to_string(),
            MatchMode::Literal => regex::escape(term),
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|e| SearchError::InvalidPattern {
                pattern: term.to_string(),
                source: e,
            })?;

        debug!(term, ?mode, "SearchPattern::compile: compiled");
        Ok(Self {
            term: term.to_string(),
            mode,
            regex,
        })
    }

    /// The trimmed term as entered
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether the pattern occurs anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// One matching paragraph with its neighbours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord<'a> {
    /// License ID the paragraph came from
    pub source_id: &'a str,
    /// Preceding paragraph, `None` at the start of the document
    pub before: Option<&'a str>,
    pub matched: &'a str,
    /// Following paragraph, `None` at the end of the document
    pub after: Option<&'a str>,
}

/// Result of a search over the whole corpus
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome<'a> {
    pub records: Vec<MatchRecord<'a>>,
    /// Number of matching paragraphs (one per paragraph, not per occurrence)
    pub match_count: usize,
}

impl SearchOutcome<'_> {
    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }

    /// Number of distinct licenses with at least one match
    pub fn documents_matched(&self) -> usize {
        self.records.iter().map(|r| r.source_id).collect::<HashSet<_>>().len()
    }
}

/// Scan every paragraph of every document for `pattern`
///
/// Documents are visited in load order and paragraphs in document order, so
/// the result is deterministic for a given corpus and pattern.
pub fn search<'a>(corpus: &'a Corpus, pattern: &SearchPattern) -> SearchOutcome<'a> {
    let mut outcome = SearchOutcome::default();

    for entry in corpus.entries() {
        let paragraphs = entry.paragraphs();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            if !pattern.is_match(paragraph) {
                continue;
            }

            outcome.records.push(MatchRecord {
                source_id: entry.id(),
                before: paragraphs.before(index),
                matched: paragraph,
                after: paragraphs.after(index),
            });
        }
    }

    outcome.match_count = outcome.records.len();
    debug!(
        term = pattern.term(),
        match_count = outcome.match_count,
        "search: complete"
    );
    outcome
}
