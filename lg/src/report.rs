//! CSV report output
//!
//! One row per matching paragraph, under a fixed header. Paragraph text is
//! quoted by the CSV encoder, so embedded newlines, quotes and commas stay
//! inside their field.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ReportError;
use crate::search::MatchRecord;

/// Report column names
pub const HEADER: [&str; 4] = ["License ID", "Paragraph Before", "Paragraph With Hit", "Paragraph After"];

/// Placeholder for a missing neighbouring paragraph
pub const NOT_AVAILABLE: &str = "N/A";

/// Write the header and one row per record, returning the number of rows
pub fn write_report<W: Write>(records: &[MatchRecord<'_>], writer: W) -> Result<usize, ReportError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    csv.write_record(HEADER)?;

    for record in records {
        csv.write_record([
            record.source_id,
            record.before.unwrap_or(NOT_AVAILABLE),
            record.matched,
            record.after.unwrap_or(NOT_AVAILABLE),
        ])?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(records.len())
}

/// Write a report to `path`
///
/// The report is written to a temporary file next to `path` and moved into
/// place only once it has been fully flushed, so `path` either holds a
/// complete report or does not exist.
pub fn write_report_file(records: &[MatchRecord<'_>], path: &Path) -> Result<usize, ReportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    debug!(?path, rows = records.len(), "write_report_file: called");

    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let rows = write_report(records, temp.as_file_mut())?;
    temp.as_file().sync_all().map_err(io_err)?;

    temp.persist(path).map_err(|e| ReportError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    info!(path = %path.display(), rows, "Report written");
    Ok(rows)
}
