//! License corpus loading
//!
//! The corpus is a flat directory of plain-text files, one license per file.
//! Each file's stem is its license ID (`MIT.txt` -> `MIT`). Files are loaded
//! in file-name order so that search output is stable between runs.
//!
//! Known limitation: two files with the same stem (e.g. `MIT.txt` and
//! `MIT.TXT`) collide; the later one wins and keeps the earlier one's slot.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::CorpusError;
use crate::paragraph::Paragraphs;

/// A single loaded license document
#[derive(Debug, Clone)]
pub struct CorpusEntry {
    id: String,
    text: String,
    paragraphs: Paragraphs,
}

impl CorpusEntry {
    /// Build an entry, segmenting its text once up front
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let paragraphs = Paragraphs::from_text(&text);
        Self {
            id: id.into(),
            text,
            paragraphs,
        }
    }

    /// License ID (file stem)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full document text as read from disk
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn paragraphs(&self) -> &Paragraphs {
        &self.paragraphs
    }
}

/// A file that could not be loaded
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// The loaded, read-only license corpus
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    dir: PathBuf,
    entries: Vec<CorpusEntry>,
    skipped: Vec<SkippedFile>,
}

impl Corpus {
    /// Load every file in `dir` whose extension is in `extensions`
    ///
    /// Extensions are compared case-insensitively and without the leading
    /// dot. Only the top level of `dir` is read. Files that fail to read are
    /// skipped and listed in [`Corpus::skipped`].
    pub fn load(dir: impl AsRef<Path>, extensions: &[String]) -> Result<Self, CorpusError> {
        let dir = dir.as_ref();
        debug!(?dir, ?extensions, "Corpus::load: called");

        if !dir.exists() {
            return Err(CorpusError::NotFound { path: dir.to_path_buf() });
        }
        if !dir.is_dir() {
            return Err(CorpusError::NotADirectory { path: dir.to_path_buf() });
        }

        let mut corpus = Self {
            dir: dir.to_path_buf(),
            ..Default::default()
        };
        let mut positions: HashMap<String, usize> = HashMap::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .follow_links(true);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(CorpusError::Walk {
                        path: dir.to_path_buf(),
                        source: e,
                    });
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf());
                    warn!(?path, error = %e, "Skipping unreadable corpus entry");
                    corpus.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !has_extension(path, extensions) {
                debug!(?path, "Corpus::load: extension not recognized, ignoring");
                continue;
            }

            let Some(id) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };

            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(?path, error = %e, "Could not read license file, skipping");
                    corpus.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            corpus.insert(CorpusEntry::new(id, text), &mut positions);
        }

        if corpus.entries.is_empty() {
            return Err(CorpusError::Empty { path: dir.to_path_buf() });
        }

        info!(
            dir = %dir.display(),
            loaded = corpus.entries.len(),
            skipped = corpus.skipped.len(),
            "Corpus loaded"
        );
        Ok(corpus)
    }

    /// Build a corpus from in-memory entries, keeping their order
    pub fn from_entries(entries: impl IntoIterator<Item = CorpusEntry>) -> Self {
        let mut corpus = Self::default();
        let mut positions = HashMap::new();
        for entry in entries {
            corpus.insert(entry, &mut positions);
        }
        corpus
    }

    fn insert(&mut self, entry: CorpusEntry, positions: &mut HashMap<String, usize>) {
        match positions.get(entry.id()) {
            Some(&index) => {
                warn!(id = entry.id(), "Duplicate license ID, later file replaces earlier one");
                self.entries[index] = entry;
            }
            None => {
                positions.insert(entry.id().to_string(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Directory the corpus was loaded from (empty for in-memory corpora)
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entries in load order
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CorpusEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files that were eligible but could not be read
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            extensions
                .iter()
                .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}
