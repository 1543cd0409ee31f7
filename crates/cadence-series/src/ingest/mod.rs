//! Delimited-text ingestion.
//!
//! [`load`] turns a header line plus data lines into a fresh
//! [`VariableStore`] and time index. It either returns a fully validated
//! result or the first error it met; nothing partially populated escapes.
//!
//! ```text
//! t,rh,datetime
//! 1.0,50.0,20190101T000000
//! 2.0,55.0,20190101T010000
//! ```

mod tokenize;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use cadence_core::{IngestError, SeriesError, Timestamp};
use cadence_store::{ColumnHandle, VariableStore};
use tracing::{debug, error, trace, warn};

use crate::config::IngestConfig;
use crate::report::IngestReport;
use tokenize::{classify, tokenize, TokenKind};

/// The validated content of one file.
pub(crate) struct Loaded {
    pub(crate) variables: VariableStore,
    pub(crate) dates: Vec<Timestamp>,
    pub(crate) report: IngestReport,
}

impl std::fmt::Debug for Loaded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loaded")
            .field("dates", &self.dates)
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

/// Where the datetime column sits once it has been identified.
struct DateColumn {
    index: usize,
    name: String,
}

/// Parse delimited text from `reader`. `origin` labels errors and the report.
pub(crate) fn load<R: BufRead>(
    reader: R,
    origin: &Path,
    config: &IngestConfig,
) -> Result<Loaded, IngestError> {
    parse(reader, origin, config).inspect_err(|e| {
        warn!(path = %origin.display(), error = %e, "rejected file");
    })
}

fn parse<R: BufRead>(
    reader: R,
    origin: &Path,
    config: &IngestConfig,
) -> Result<Loaded, IngestError> {
    config.validate()?;
    let started = Instant::now();
    debug!(path = %origin.display(), "parsing file");

    let path = || origin.to_path_buf();
    let io_err = |source| IngestError::Io {
        path: path(),
        source,
    };

    let mut lines = reader.lines();
    let mut line_no = 0usize;
    let mut blank_lines = 0usize;

    // Header: first non-blank line.
    let header: Vec<String> = loop {
        let Some(line) = lines.next() else {
            return Err(IngestError::EmptyFile { path: path() });
        };
        let line = line.map_err(io_err)?;
        line_no += 1;
        let tokens = tokenize(&line, config);
        if tokens.is_empty() {
            blank_lines += 1;
            continue;
        }
        break tokens.iter().map(|t| t.to_string()).collect();
    };

    let variables = VariableStore::new();
    // One slot per header position; the date column's slot is cleared once
    // it is identified.
    let mut columns: Vec<Option<ColumnHandle>> = Vec::with_capacity(header.len());
    for name in &header {
        let handle = variables.register_new(name).map_err(|_| IngestError::Insertion {
            path: path(),
            name: name.clone(),
        })?;
        columns.push(Some(handle));
    }

    let mut dates = Vec::new();
    let mut date_column: Option<DateColumn> = None;
    let mut rows = 0usize;

    for line in lines {
        let line = line.map_err(io_err)?;
        line_no += 1;
        let tokens = tokenize(&line, config);
        if tokens.is_empty() {
            blank_lines += 1;
            continue;
        }
        if tokens.len() != header.len() {
            return Err(IngestError::ColumnCountMismatch {
                path: path(),
                line: line_no,
                expected: header.len(),
                found: tokens.len(),
            });
        }
        trace!(line = line_no, tokens = tokens.len(), "data line");

        for (index, &token) in tokens.iter().enumerate() {
            let parse_err = || IngestError::Parse {
                path: path(),
                line: line_no,
                token: token.to_string(),
            };
            match classify(token) {
                TokenKind::Number => {
                    // The date column has been dropped from the store.
                    let Some(column) = &columns[index] else {
                        return Err(parse_err());
                    };
                    // Overflowing tokens such as `1e400` parse to infinity.
                    let value = token
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or_else(|| IngestError::BadCast {
                            path: path(),
                            line: line_no,
                            token: token.to_string(),
                        })?;
                    column.lock().push(value);
                }
                TokenKind::DateTime => {
                    let ts = Timestamp::parse_compact(token).map_err(|_| parse_err())?;
                    match date_column.as_ref().map(|d| d.index) {
                        None => {
                            let name = header[index].clone();
                            debug!(column = %name, "identified date column");
                            variables.remove(&name);
                            columns[index] = None;
                            date_column = Some(DateColumn { index, name });
                        }
                        Some(i) if i == index => {}
                        Some(_) => {
                            return Err(IngestError::DateColumnConflict {
                                path: path(),
                                line: line_no,
                                date_column: date_column
                                    .as_ref()
                                    .map(|d| d.name.clone())
                                    .unwrap_or_default(),
                                column: header[index].clone(),
                            });
                        }
                    }
                    dates.push(ts);
                }
                TokenKind::Unknown => return Err(parse_err()),
            }
        }
        rows += 1;
    }

    // With no data rows nothing identified the date column; fall back to
    // the header hint so written files read back with the same names.
    if date_column.is_none() && rows == 0 {
        if let Some(index) = header.iter().position(|h| *h == config.date_header) {
            let name = header[index].clone();
            debug!(column = %name, "date column taken from header hint");
            variables.remove(&name);
            date_column = Some(DateColumn { index, name });
        }
    }

    if let Err(SeriesError::LengthMismatch {
        column,
        expected,
        actual,
    }) = variables.check_lengths(dates.len())
    {
        error!(
            path = %origin.display(),
            column = %column,
            expected,
            actual,
            "column is a different size from the time index"
        );
        return Err(IngestError::ColumnLengthMismatch {
            path: path(),
            column,
            expected,
            actual,
        });
    }

    let report = IngestReport {
        source: path(),
        rows,
        variables: variables.len(),
        date_column: date_column.map(|d| d.name),
        blank_lines,
        elapsed_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    };
    debug!(
        path = %origin.display(),
        rows = report.rows,
        variables = report.variables,
        elapsed_us = report.elapsed_us,
        "read file"
    );

    Ok(Loaded {
        variables,
        dates,
        report,
    })
}

/// Convenience for callers that only have a path.
pub(crate) fn load_path(path: &Path, config: &IngestConfig) -> Result<Loaded, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    load(std::io::BufReader::new(file), path, config)
}
