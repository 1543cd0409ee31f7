//! Error types for the Cadence forcing store.
//!
//! Organized by phase: steady-state access ([`SeriesError`]), file
//! ingestion ([`IngestError`]), serialization ([`FileIoError`]) and
//! configuration ([`ConfigError`]). Every failure is fatal to the
//! operation that raised it; nothing here is retried internally.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::timestamp::Timestamp;

/// Errors from store, cursor and lookup operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeriesError {
    /// The variable name was never registered in this store.
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },
    /// The timestamp is not present in the time index.
    TimestepNotFound {
        /// The timestamp that was searched for.
        timestamp: Timestamp,
    },
    /// A name could not be registered (duplicate in a set that must be unique).
    Insertion {
        /// The conflicting name.
        name: String,
    },
    /// A row index lies outside a column or the time index.
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// The length that was available.
        len: usize,
    },
    /// A column length disagrees with the time index.
    LengthMismatch {
        /// The offending column.
        column: String,
        /// Expected length (the time index length).
        expected: usize,
        /// Actual column length.
        actual: usize,
    },
    /// The series is sealed; its name set and time index can no longer
    /// be redefined.
    Sealed,
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "variable '{name}' does not exist"),
            Self::TimestepNotFound { timestamp } => {
                write!(f, "timestep {timestamp} not found")
            }
            Self::Insertion { name } => write!(f, "failed to insert variable '{name}'"),
            Self::RowOutOfRange { row, len } => {
                write!(f, "row {row} out of range for length {len}")
            }
            Self::LengthMismatch {
                column,
                expected,
                actual,
            } => write!(
                f,
                "column '{column}' has {actual} rows, expected {expected}"
            ),
            Self::Sealed => write!(f, "series is sealed"),
        }
    }
}

impl Error for SeriesError {}

/// Errors from loading a delimited forcing file.
///
/// Every variant that concerns file content names the source so that a
/// failure in a batch load of many station files is attributable.
#[derive(Debug)]
pub enum IngestError {
    /// The file could not be opened or read.
    Io {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file contains no non-blank line to use as a header.
    EmptyFile {
        /// Source path.
        path: PathBuf,
    },
    /// The header names the same column twice.
    Insertion {
        /// Source path.
        path: PathBuf,
        /// The duplicated column name.
        name: String,
    },
    /// A data line has a different token count from the header.
    ColumnCountMismatch {
        /// Source path.
        path: PathBuf,
        /// 1-based line number in the file.
        line: usize,
        /// Header token count.
        expected: usize,
        /// Token count found on the line.
        found: usize,
    },
    /// A token matches neither the numeric nor the datetime pattern.
    Parse {
        /// Source path.
        path: PathBuf,
        /// 1-based line number in the file.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A numeric token failed to convert to `f64`.
    BadCast {
        /// Source path.
        path: PathBuf,
        /// 1-based line number in the file.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// A datetime appeared in a second column after the date column was fixed.
    DateColumnConflict {
        /// Source path.
        path: PathBuf,
        /// 1-based line number in the file.
        line: usize,
        /// Name of the column already holding datetimes.
        date_column: String,
        /// Name of the column where another datetime was found.
        column: String,
    },
    /// A column ended with a different row count from the time index.
    ColumnLengthMismatch {
        /// Source path.
        path: PathBuf,
        /// The offending column.
        column: String,
        /// Expected length (the time index length).
        expected: usize,
        /// Actual column length.
        actual: usize,
    },
    /// The ingest configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::EmptyFile { path } => write!(f, "{}: no header line", path.display()),
            Self::Insertion { path, name } => {
                write!(f, "{}: duplicate column '{name}'", path.display())
            }
            Self::ColumnCountMismatch {
                path,
                line,
                expected,
                found,
            } => write!(
                f,
                "{}:{line}: expected {expected} columns, found {found}",
                path.display()
            ),
            Self::Parse { path, line, token } => write!(
                f,
                "{}:{line}: unable to match any pattern for '{token}'",
                path.display()
            ),
            Self::BadCast { path, line, token } => write!(
                f,
                "{}:{line}: failed to cast '{token}' to a double",
                path.display()
            ),
            Self::DateColumnConflict {
                path,
                line,
                date_column,
                column,
            } => write!(
                f,
                "{}:{line}: datetime in column '{column}' but '{date_column}' is the date column",
                path.display()
            ),
            Self::ColumnLengthMismatch {
                path,
                column,
                expected,
                actual,
            } => write!(
                f,
                "{}: column '{column}' has {actual} rows, expected {expected}",
                path.display()
            ),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for IngestError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Failure to create or write a serialized series.
#[derive(Debug)]
pub struct FileIoError {
    /// Destination path (or a placeholder for in-memory sinks).
    pub path: PathBuf,
    /// Underlying I/O error.
    pub source: io::Error,
}

impl fmt::Display for FileIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write {}: {}", self.path.display(), self.source)
    }
}

impl Error for FileIoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Invalid reader or writer configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// No separator characters were configured.
    NoSeparators,
    /// A separator would split or merge numeric/datetime tokens.
    InvalidSeparator {
        /// The rejected character.
        separator: char,
    },
    /// The output delimiter would make the file unreadable.
    InvalidDelimiter {
        /// The rejected character.
        delimiter: char,
    },
    /// The date column header is empty or contains a delimiter.
    InvalidDateHeader {
        /// The rejected header.
        header: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSeparators => write!(f, "at least one separator is required"),
            Self::InvalidSeparator { separator } => {
                write!(f, "'{separator}' cannot be used as a separator")
            }
            Self::InvalidDelimiter { delimiter } => {
                write!(f, "'{}' cannot be used as an output delimiter", delimiter.escape_default())
            }
            Self::InvalidDateHeader { header } => {
                write!(f, "invalid date column header '{header}'")
            }
        }
    }
}

impl Error for ConfigError {}
