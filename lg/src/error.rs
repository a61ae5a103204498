//! Error types for licensegrep

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the license corpus
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Corpus path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("No license files found in {path}")]
    Empty { path: PathBuf },

    #[error("Failed to list corpus directory {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors that can occur while preparing a search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search term is empty")]
    EmptyTerm,

    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode report row: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to move report into place at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors in resolved configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Output directory {output} is inside the corpus directory {corpus}")]
    OutputInsideCorpus { output: PathBuf, corpus: PathBuf },

    #[error("Exit keyword must not be empty")]
    EmptyExitKeyword,

    #[error("At least one corpus file extension is required")]
    NoExtensions,
}
