//! Positional iterators over a [`TimeSeries`].
//!
//! [`SeriesIter`] is a cursor with C++-style `begin`/`end` semantics:
//! it can be incremented, decremented, compared and measured, and it may
//! sit one past the last row. [`Steps`] adapts a `[start, end)` pair into
//! a standard Rust iterator of [`Timestep`]s.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use cadence_core::SeriesError;

use crate::series::TimeSeries;
use crate::timestep::Timestep;

/// A movable position in a series.
///
/// Equality and ordering are defined on the row index. Two iterators
/// compare equal only if they refer to the same series, saw the same
/// number of registered variables when created, and sit on the same row.
#[derive(Clone, Copy)]
pub struct SeriesIter<'a> {
    series: &'a TimeSeries,
    row: usize,
    cardinality: usize,
}

impl<'a> SeriesIter<'a> {
    pub(crate) fn new(series: &'a TimeSeries, row: usize) -> Self {
        Self {
            series,
            row,
            cardinality: series.variable_count(),
        }
    }

    /// Current row index. Equals the series length at `end()`.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Number of variables registered when this iterator was created.
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Whether this iterator sits one past the last row.
    pub fn is_end(&self) -> bool {
        self.row >= self.series.len()
    }

    /// Advance one row. Saturates at `end()`.
    pub fn increment(&mut self) -> &mut Self {
        if !self.is_end() {
            self.row += 1;
        }
        self
    }

    /// Step back one row. Saturates at row 0.
    pub fn decrement(&mut self) -> &mut Self {
        self.row = self.row.saturating_sub(1);
        self
    }

    /// Move by `n` rows, clamped to `[0, len]`.
    pub fn advance(&mut self, n: isize) -> &mut Self {
        self.row = self.row.saturating_add_signed(n).min(self.series.len());
        self
    }

    /// Signed number of rows from `self` to `other`.
    pub fn distance_to(&self, other: &SeriesIter<'_>) -> isize {
        other.row as isize - self.row as isize
    }

    /// The row under the iterator, or `None` at `end()`.
    pub fn current(&self) -> Option<Timestep<'a>> {
        Timestep::at(self.series, self.row)
    }

    /// Value of `name` at the current row.
    ///
    /// Fails with [`SeriesError::RowOutOfRange`] at `end()`.
    pub fn get(&self, name: &str) -> Result<f64, SeriesError> {
        self.step()?.get(name)
    }

    /// Overwrite `name` at the current row.
    ///
    /// Fails with [`SeriesError::RowOutOfRange`] at `end()`.
    pub fn set(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        self.step()?.set(name, value)
    }

    fn step(&self) -> Result<Timestep<'a>, SeriesError> {
        self.current().ok_or(SeriesError::RowOutOfRange {
            row: self.row,
            len: self.series.len(),
        })
    }

    /// Iterate the rows in `[self, end)`.
    ///
    /// An `end` before `self` yields nothing.
    pub fn until(&self, end: &SeriesIter<'_>) -> Steps<'a> {
        let back = end.row.min(self.series.len());
        Steps {
            series: self.series,
            front: self.row.min(back),
            back,
        }
    }
}

impl PartialEq for SeriesIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.cardinality != other.cardinality {
            return false;
        }
        std::ptr::eq(self.series, other.series) && self.row == other.row
    }
}

impl Eq for SeriesIter<'_> {}

/// Iterators over different series are unordered.
impl PartialOrd for SeriesIter<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if std::ptr::eq(self.series, other.series) {
            Some(self.row.cmp(&other.row))
        } else {
            None
        }
    }
}

impl fmt::Debug for SeriesIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeriesIter")
            .field("row", &self.row)
            .field("cardinality", &self.cardinality)
            .field("timestamp", &self.series.timestamp_at(self.row))
            .finish()
    }
}

/// Rows of a series in `[front, back)`, yielded as [`Timestep`]s.
#[derive(Clone)]
pub struct Steps<'a> {
    series: &'a TimeSeries,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Steps<'a> {
    type Item = Timestep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let step = Timestep::at(self.series, self.front);
        self.front += 1;
        step
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Steps<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Timestep::at(self.series, self.back)
    }
}

impl ExactSizeIterator for Steps<'_> {}

impl FusedIterator for Steps<'_> {}
