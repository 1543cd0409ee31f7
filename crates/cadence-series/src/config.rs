//! Reader and writer configuration.

use cadence_core::ConfigError;
use smallvec::{smallvec, SmallVec};

/// Characters that may never split a token: they occur inside numbers
/// (`1.5e-3`, `+2`) or compact timestamps (`20190101T000000`).
fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '+' | '-')
}

/// Configuration for delimited-file ingestion.
///
/// Whitespace always separates tokens; `separators` lists the additional
/// characters that do. Runs of separators collapse, so `1.0,,2.0` is two
/// tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestConfig {
    /// Extra separator characters. Default: `[',']`.
    pub separators: SmallVec<[char; 4]>,
    /// Header name treated as the date column when no data row
    /// identifies one. Default: `"Date"`, matching [`WriterConfig`].
    pub date_header: String,
}

impl IngestConfig {
    /// Config splitting on whitespace and the given characters.
    pub fn with_separators(separators: impl IntoIterator<Item = char>) -> Self {
        Self {
            separators: separators.into_iter().collect(),
            date_header: WriterConfig::DEFAULT_DATE_HEADER.to_string(),
        }
    }

    /// Check that no separator can occur inside a numeric or datetime token.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separators.is_empty() {
            return Err(ConfigError::NoSeparators);
        }
        match self.separators.iter().find(|&&c| is_token_char(c)) {
            Some(&separator) => Err(ConfigError::InvalidSeparator { separator }),
            None => Ok(()),
        }
    }

    /// Whether `c` ends a token.
    pub fn is_separator(&self, c: char) -> bool {
        c.is_whitespace() || self.separators.contains(&c)
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            separators: smallvec![','],
            date_header: WriterConfig::DEFAULT_DATE_HEADER.to_string(),
        }
    }
}

/// Configuration for serializing a series to delimited text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterConfig {
    /// Field delimiter. Default: tab.
    pub delimiter: char,
    /// Header of the timestamp column. Default: `"Date"`.
    pub date_header: String,
}

impl WriterConfig {
    /// Default header for the timestamp column.
    pub const DEFAULT_DATE_HEADER: &'static str = "Date";

    /// Check that the output can be read back.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_token_char(self.delimiter) {
            return Err(ConfigError::InvalidDelimiter {
                delimiter: self.delimiter,
            });
        }
        let header_ok = !self.date_header.is_empty()
            && !self
                .date_header
                .chars()
                .any(|c| c.is_whitespace() || c == self.delimiter);
        if !header_ok {
            return Err(ConfigError::InvalidDateHeader {
                header: self.date_header.clone(),
            });
        }
        Ok(())
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            date_header: Self::DEFAULT_DATE_HEADER.to_string(),
        }
    }
}
