//! The [`Timestep`] cursor: one row of a series, every variable at once.

use std::fmt;

use cadence_core::{SeriesError, Timestamp, VariableReader, VariableWriter};
use chrono::NaiveDate;

use crate::series::TimeSeries;

/// A view of one row of a [`TimeSeries`].
///
/// A timestep is a row index plus a borrow of its series. All variables
/// and the timestamp are read through that one index, so the columns
/// are always observed at the same instant.
///
/// Timesteps only exist for rows that are present in the time index; the
/// one-past-the-end position is represented by a [`SeriesIter`](crate::SeriesIter)
/// whose [`current`](crate::SeriesIter::current) is `None`.
#[derive(Clone, Copy)]
pub struct Timestep<'a> {
    series: &'a TimeSeries,
    row: usize,
    timestamp: Timestamp,
}

impl<'a> Timestep<'a> {
    pub(crate) fn at(series: &'a TimeSeries, row: usize) -> Option<Self> {
        let timestamp = series.timestamp_at(row)?;
        Some(Self {
            series,
            row,
            timestamp,
        })
    }

    /// Value of `name` at this row.
    pub fn get(&self, name: &str) -> Result<f64, SeriesError> {
        self.series.variables().value_at(name, self.row)
    }

    /// Overwrite `name` at this row.
    pub fn set(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        self.series.variables().set_at(name, self.row, value)
    }

    /// Row index within the series.
    pub fn row(&self) -> usize {
        self.row
    }

    /// The instant of this row.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Calendar date of this row.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Calendar year of this row.
    pub fn year(&self) -> i32 {
        self.timestamp.year()
    }

    /// Month of this row, `1..=12`.
    pub fn month(&self) -> u32 {
        self.timestamp.month()
    }

    /// Day of the month of this row, `1..=31`.
    pub fn day(&self) -> u32 {
        self.timestamp.day()
    }
}

impl VariableReader for Timestep<'_> {
    fn get(&self, name: &str) -> Result<f64, SeriesError> {
        Timestep::get(self, name)
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl VariableWriter for Timestep<'_> {
    fn set(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        Timestep::set(self, name, value)
    }
}

/// Tab-separated values of every variable, in registration order.
impl fmt::Display for Timestep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, column)) in self.series.variables().columns().into_iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            match column.lock().get(self.row) {
                Some(v) => write!(f, "{v}")?,
                None => f.write_str("-")?,
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Timestep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timestep")
            .field("row", &self.row)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}
