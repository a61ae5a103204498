//! Search session management
//!
//! Each search term gets its own result folder under the output directory,
//! named after the term. The folder is removed again when nothing matched,
//! so only searches with hits leave anything on disk.
//!
//! ```text
//! Idle -> AwaitingTerm -> Exit
//!                      -> Validating -> Searching -> Reporting -> AwaitingTerm
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;
use eyre::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::SearchError;
use crate::interrupt;
use crate::report::write_report_file;
use crate::search::{SearchPattern, search};

/// Folder name used when a term sanitizes down to nothing usable
pub const FALLBACK_FOLDER_NAME: &str = "unnamed-search";

/// Characters that are not allowed in folder names on common file systems
const ILLEGAL_FOLDER_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// A line of operator input, classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    Exit,
    Empty,
    /// A trimmed, non-empty search term
    Term(&'a str),
}

/// Classify a line of input; the exit keyword is matched case-insensitively
pub fn classify_input<'a>(line: &'a str, exit_keyword: &str) -> Input<'a> {
    let input = line.trim();
    if input.is_empty() {
        Input::Empty
    } else if input.eq_ignore_ascii_case(exit_keyword.trim()) {
        Input::Exit
    } else {
        Input::Term(input)
    }
}

/// Derive a result folder name from a search term
pub fn folder_name_for(term: &str, max_len: usize) -> String {
    let cleaned: String = term
        .chars()
        .filter(|c| !ILLEGAL_FOLDER_CHARS.contains(c) && !c.is_control())
        .take(max_len)
        .collect();
    let name = cleaned.trim();

    if name.is_empty() || name.chars().all(|c| c == '.') {
        FALLBACK_FOLDER_NAME.to_string()
    } else {
        name.to_string()
    }
}

/// Per-term state, local to one iteration of the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub term: String,
    pub output_location: PathBuf,
    pub match_count: usize,
}

/// What happened to one search term
#[derive(Debug)]
pub enum TermOutcome {
    /// Term was blank, nothing was done
    Rejected,
    /// Nothing matched, the result folder was removed
    NoResults { session: SearchSession },
    /// Report written
    Written {
        session: SearchSession,
        report: PathBuf,
        documents: usize,
    },
    /// Pattern did not compile or the report could not be written
    Failed { term: String, error: eyre::Report },
}

/// Runs searches against a loaded corpus
pub struct Session<'a> {
    corpus: &'a Corpus,
    config: &'a Config,
}

impl<'a> Session<'a> {
    pub fn new(corpus: &'a Corpus, config: &'a Config) -> Self {
        Self { corpus, config }
    }

    /// Search for one term and write its report
    pub fn run_term(&self, term: &str) -> TermOutcome {
        debug!(term, "Session::run_term: called");

        let pattern = match SearchPattern::compile(term, self.config.match_mode()) {
            Ok(pattern) => pattern,
            Err(SearchError::EmptyTerm) => return TermOutcome::Rejected,
            Err(e) => {
                warn!(term, error = %e, "Search pattern rejected");
                return TermOutcome::Failed {
                    term: term.trim().to_string(),
                    error: e.into(),
                };
            }
        };
        let term = pattern.term().to_string();

        let folder = self
            .config
            .output_dir
            .join(folder_name_for(&term, self.config.max_folder_name_len));
        if let Err(e) = fs::create_dir_all(&folder) {
            return TermOutcome::Failed {
                term,
                error: eyre::Report::new(e).wrap_err(format!("Failed to create folder {}", folder.display())),
            };
        }

        let mut session = SearchSession {
            term,
            output_location: folder,
            match_count: 0,
        };

        let outcome = search(self.corpus, &pattern);
        session.match_count = outcome.match_count;

        if outcome.is_empty() {
            remove_stale_report(&session.output_location.join(&self.config.report_file_name));
            remove_if_empty(&session.output_location);
            info!(term = %session.term, "No matches");
            return TermOutcome::NoResults { session };
        }

        let report = session.output_location.join(&self.config.report_file_name);
        match write_report_file(&outcome.records, &report) {
            Ok(rows) => {
                debug!(rows, match_count = session.match_count, "Session::run_term: report complete");
                let report = match fs::canonicalize(&report) {
                    Ok(canonical) => canonical,
                    Err(e) => {
                        debug!(?report, error = %e, "Session::run_term: keeping non-canonical report path");
                        report
                    }
                };
                info!(term = %session.term, match_count = session.match_count, report = %report.display(), "Search complete");
                TermOutcome::Written {
                    session,
                    report,
                    documents: outcome.documents_matched(),
                }
            }
            Err(e) => {
                warn!(term = %session.term, error = %e, "Report write failed");
                remove_if_empty(&session.output_location);
                TermOutcome::Failed {
                    term: session.term,
                    error: e.into(),
                }
            }
        }
    }

    /// Run the interactive prompt loop until exit, EOF or Ctrl+C
    pub fn run_interactive(&self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        let exit_keyword = &self.config.exit_keyword;

        loop {
            if interrupt::requested() {
                break;
            }

            match rl.readline(&format!("{} ", ">".bright_green())) {
                Ok(line) => match classify_input(&line, exit_keyword) {
                    Input::Exit => break,
                    Input::Empty => print_empty_term(),
                    Input::Term(term) => {
                        let _ = rl.add_history_entry(term);
                        println!("Searching for '{}'...", term.cyan());
                        let outcome = self.run_term(term);
                        print_outcome(&outcome);
                    }
                },
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(_) if interrupt::requested() => break,
                Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "License Search".bright_cyan().bold());
        println!("Corpus: {} ({} licenses)", self.corpus.dir().display(), self.corpus.len());
        println!(
            "Enter a word or phrase to search for, {} to quit",
            self.config.exit_keyword.yellow()
        );
        println!();
    }
}

/// Print the operator-facing summary for one term
pub fn print_outcome(outcome: &TermOutcome) {
    match outcome {
        TermOutcome::Rejected => print_empty_term(),
        TermOutcome::NoResults { session } => {
            println!("No results found for '{}'.", session.term);
        }
        TermOutcome::Written {
            session,
            report,
            documents,
        } => {
            println!(
                "{} Search complete. Found {} {} in {} {}.",
                "✓".green(),
                session.match_count,
                plural(session.match_count, "match", "matches"),
                documents,
                plural(*documents, "license", "licenses"),
            );
            println!("Results saved to: {}", report.display().to_string().cyan());
        }
        TermOutcome::Failed { term, error } => {
            eprintln!("{} Search for '{}' failed: {:#}", "✗".red(), term, error);
        }
    }
}

fn print_empty_term() {
    println!("{} Please enter a valid search term.", "!".yellow());
}

fn plural<'s>(count: usize, one: &'s str, many: &'s str) -> &'s str {
    if count == 1 { one } else { many }
}

/// Remove a report left by an earlier search that now has no matches
fn remove_stale_report(report: &Path) {
    match fs::remove_file(report) {
        Ok(()) => info!(?report, "Removed stale report"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(?report, error = %e, "Could not remove stale report"),
    }
}

fn remove_if_empty(folder: &Path) {
    match fs::remove_dir(folder) {
        Ok(()) => debug!(?folder, "remove_if_empty: removed result folder"),
        Err(e) => debug!(?folder, error = %e, "remove_if_empty: folder kept"),
    }
}

/// Load the corpus named by `config`, printing the outcome for the operator
///
/// Returns `None` when no corpus is available; that is reported, not fatal.
pub fn load_corpus(config: &Config) -> Option<Corpus> {
    match Corpus::load(&config.corpus_dir, &config.extensions)
        .with_context(|| format!("Could not load licenses from '{}'", config.corpus_dir.display()))
    {
        Ok(corpus) => {
            for skipped in corpus.skipped() {
                eprintln!(
                    "{} Could not read {}: {}",
                    "!".yellow(),
                    skipped.path.display(),
                    skipped.reason
                );
            }
            println!(
                "{} Loaded {} {} from {}",
                "✓".green(),
                corpus.len(),
                plural(corpus.len(), "license", "licenses"),
                config.corpus_dir.display()
            );
            Some(corpus)
        }
        Err(e) => {
            warn!(error = %format!("{:#}", e), "Corpus unavailable");
            eprintln!("{} {:#}", "✗".red(), e);
            None
        }
    }
}
