//! Configuration for licensegrep

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::search::MatchMode;

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "licensegrep.yml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one license text per file
    pub corpus_dir: PathBuf,

    /// Directory under which per-search result folders are created
    pub output_dir: PathBuf,

    /// File extensions treated as license texts
    pub extensions: Vec<String>,

    /// Input that ends the interactive session (case-insensitive)
    pub exit_keyword: String,

    /// Maximum length of a result folder name, in characters
    pub max_folder_name_len: usize,

    /// File name of the report inside each result folder
    pub report_file_name: String,

    /// Match search terms as plain text instead of regular expressions
    pub literal: bool,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(crate::DEFAULT_CORPUS_DIR),
            output_dir: PathBuf::from(crate::DEFAULT_OUTPUT_DIR),
            extensions: vec!["txt".to_string()],
            exit_keyword: "exit".to_string(),
            max_folder_name_len: crate::DEFAULT_MAX_FOLDER_NAME_LEN,
            report_file_name: crate::DEFAULT_REPORT_FILE_NAME.to_string(),
            literal: false,
            log_level: None,
        }
    }
}

impl Config {
    /// Load config with fallback chain
    ///
    /// An explicit path must load. Otherwise `./licensegrep.yml`, then
    /// `~/.config/licensegrep/licensegrep.yml`, then built-in defaults.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(config_path)
                .context(format!("Failed to load config from {}", config_path.display()));
        }

        let default_paths = [
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
            dirs::config_dir().map(|p| p.join("licensegrep").join(LOCAL_CONFIG_FILE)),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    pub fn load_log_level(path: Option<&PathBuf>) -> Option<String> {
        Self::load(path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply command-line overrides on top of loaded values
    pub fn apply_overrides(&mut self, corpus: Option<PathBuf>, output: Option<PathBuf>, literal: bool) {
        if let Some(corpus) = corpus {
            self.corpus_dir = corpus;
        }
        if let Some(output) = output {
            self.output_dir = output;
        }
        if literal {
            self.literal = true;
        }
    }

    pub fn match_mode(&self) -> MatchMode {
        if self.literal { MatchMode::Literal } else { MatchMode::Pattern }
    }

    /// Check that the resolved settings can drive a session
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exit_keyword.trim().is_empty() {
            return Err(ConfigError::EmptyExitKeyword);
        }
        if self.extensions.iter().all(|e| e.trim_start_matches('.').is_empty()) {
            return Err(ConfigError::NoExtensions);
        }

        let corpus = absolute(&self.corpus_dir);
        let output = absolute(&self.output_dir);
        if output.starts_with(&corpus) {
            return Err(ConfigError::OutputInsideCorpus { output, corpus });
        }
        Ok(())
    }
}

/// Best-effort canonical path, resolving the longest existing ancestor
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match (abs.parent(), abs.file_name()) {
        (Some(parent), Some(name)) => absolute(parent).join(name),
        _ => abs,
    }
}
