//! The [`Timestamp`] row key and its compact ISO-8601 text form.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike};

/// `strftime` pattern for the compact ISO-8601 form `YYYYMMDDThhmmss`.
pub const COMPACT_ISO_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Length in bytes of a compact ISO-8601 token.
const COMPACT_LEN: usize = 15;

/// A naive (zone-less) instant identifying one row of a time series.
///
/// Forcing files carry local station time without an offset, so the
/// timestamp is deliberately naive. Ordering follows the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Build a timestamp from calendar components.
    ///
    /// Returns `None` if any component is out of range (e.g. February 30).
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, min, sec))
            .map(Self)
    }

    /// Parse the compact ISO-8601 form `YYYYMMDDThhmmss`.
    ///
    /// The whole string must have that shape; surrounding text is rejected.
    pub fn parse_compact(s: &str) -> Result<Self, TimestampParseError> {
        if !is_compact_iso(s) {
            return Err(TimestampParseError::Shape {
                input: s.to_string(),
            });
        }
        NaiveDateTime::parse_from_str(s, COMPACT_ISO_FORMAT)
            .map(Self)
            .map_err(|_| TimestampParseError::OutOfRange {
                input: s.to_string(),
            })
    }

    /// The underlying `chrono` value.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The calendar date of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month of the year, `1..=12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of the month, `1..=31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Hour of the day, `0..=23`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Shift by a signed number of seconds, `None` on overflow.
    pub fn checked_add_seconds(&self, secs: i64) -> Option<Self> {
        let delta = TimeDelta::try_seconds(secs)?;
        self.0.checked_add_signed(delta).map(Self)
    }
}

/// Whether `s` has the exact shape `DDDDDDDDTDDDDDD` (digits around a `T`).
///
/// This is a shape check only; calendar validity is checked by
/// [`Timestamp::parse_compact`].
pub fn is_compact_iso(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == COMPACT_LEN
        && b[8] == b'T'
        && b[..8].iter().all(u8::is_ascii_digit)
        && b[9..].iter().all(u8::is_ascii_digit)
}

impl From<NaiveDateTime> for Timestamp {
    fn from(v: NaiveDateTime) -> Self {
        Self(v)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(COMPACT_ISO_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_compact(s)
    }
}

/// Failure to parse a compact ISO-8601 timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimestampParseError {
    /// The text is not of the form `YYYYMMDDThhmmss`.
    Shape {
        /// The rejected input.
        input: String,
    },
    /// The text has the right shape but names no calendar instant.
    OutOfRange {
        /// The rejected input.
        input: String,
    },
}

impl fmt::Display for TimestampParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape { input } => {
                write!(f, "'{input}' is not a YYYYMMDDThhmmss timestamp")
            }
            Self::OutOfRange { input } => {
                write!(f, "'{input}' is not a valid calendar instant")
            }
        }
    }
}

impl std::error::Error for TimestampParseError {}
