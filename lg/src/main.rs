use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use licensegrep::cli::{Cli, Command};
use licensegrep::config::Config;
use licensegrep::session::{Session, TermOutcome, load_corpus, print_outcome};
use licensegrep::{Corpus, interrupt};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("licensegrep")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("licensegrep.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.apply_overrides(cli.corpus, cli.output, cli.literal);
    config.validate().context("Invalid configuration")?;
    debug!(?config, "main: resolved configuration");

    interrupt::install().context("Failed to install interrupt handler")?;

    // A missing or empty corpus is reported by load_corpus and ends the run
    let Some(corpus) = load_corpus(&config) else {
        return Ok(ExitCode::SUCCESS);
    };

    match cli.command {
        None | Some(Command::Repl) => {
            Session::new(&corpus, &config).run_interactive()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Search { term }) => Ok(cmd_search(&corpus, &config, &term)),
        Some(Command::List) => {
            cmd_list(&corpus);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_search(corpus: &Corpus, config: &Config, term: &str) -> ExitCode {
    let outcome = Session::new(corpus, config).run_term(term);
    print_outcome(&outcome);

    match outcome {
        TermOutcome::Written { .. } | TermOutcome::NoResults { .. } => ExitCode::SUCCESS,
        TermOutcome::Rejected | TermOutcome::Failed { .. } => ExitCode::FAILURE,
    }
}

fn cmd_list(corpus: &Corpus) {
    for entry in corpus.entries() {
        println!(
            "{} {}",
            entry.id().cyan(),
            format!("({} paragraphs)", entry.paragraphs().len()).dimmed()
        );
    }
}
