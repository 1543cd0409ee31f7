//! Statistics about a completed file load.

use std::path::PathBuf;

/// Summary of a successful ingestion, kept on the loaded series.
///
/// Failed loads produce an [`IngestError`](cadence_core::IngestError)
/// instead; no report exists for them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Path (or origin label) the data came from.
    pub source: PathBuf,
    /// Number of data rows loaded.
    pub rows: usize,
    /// Number of numeric variables (header width minus the date column).
    pub variables: usize,
    /// Header name of the datetime column, if any row carried one.
    pub date_column: Option<String>,
    /// Blank lines skipped anywhere in the file.
    pub blank_lines: usize,
    /// Wall-clock time for the load, in microseconds.
    pub elapsed_us: u64,
}
