//! licensegrep - paragraph-level search over a local license corpus
//!
//! Loads a directory of license texts, splits each into blank-line separated
//! paragraphs, and for every paragraph matching a search term reports the
//! paragraph together with its neighbours.
//!
//! # Layout
//!
//! ```text
//! text/                    # corpus, one license per file
//! ├── Apache-2.0.txt
//! ├── MIT.txt
//! └── ...
//! ../{sanitized term}/     # one folder per search with hits
//!     └── results.csv      # License ID, Paragraph Before, Paragraph With Hit, Paragraph After
//! ```
//!
//! # Example
//!
//! ```ignore
//! use licensegrep::{Corpus, MatchMode, SearchPattern, search, write_report_file};
//!
//! let corpus = Corpus::load("text", &["txt".to_string()])?;
//! let pattern = SearchPattern::compile("warrant(y|ies)", MatchMode::Pattern)?;
//! let outcome = search(&corpus, &pattern);
//! write_report_file(&outcome.records, "results.csv".as_ref())?;
//! ```

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod interrupt;
pub mod paragraph;
pub mod report;
pub mod search;
pub mod session;

pub use corpus::{Corpus, CorpusEntry, SkippedFile};
pub use error::{ConfigError, CorpusError, ReportError, SearchError};
pub use paragraph::{Paragraphs, segment};
pub use report::{HEADER, NOT_AVAILABLE, write_report, write_report_file};
pub use search::{MatchMode, MatchRecord, SearchOutcome, SearchPattern, search};
pub use session::{Input, SearchSession, Session, TermOutcome};

/// Default corpus directory, relative to the working directory
pub const DEFAULT_CORPUS_DIR: &str = "text";

/// Default parent of result folders, kept outside the corpus
pub const DEFAULT_OUTPUT_DIR: &str = "..";

/// Default maximum result folder name length (characters)
pub const DEFAULT_MAX_FOLDER_NAME_LEN: usize = 100;

/// Default report file name inside each result folder
pub const DEFAULT_REPORT_FILE_NAME: &str = "results.csv";
