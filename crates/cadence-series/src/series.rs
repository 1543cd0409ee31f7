//! The [`TimeSeries`]: a variable store plus the shared time index.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use cadence_core::{FileIoError, IngestError, SeriesError, Timestamp};
use cadence_store::VariableStore;
use tracing::debug;

use crate::config::{IngestConfig, WriterConfig};
use crate::ingest::{self, Loaded};
use crate::iter::{SeriesIter, Steps};
use crate::report::IngestReport;
use crate::writer;

/// Name used for the time index in length-mismatch errors.
const TIME_INDEX: &str = "<time index>";

/// A time-indexed set of `f64` columns.
///
/// Every column has one value per entry of the time index once the series
/// is *sealed* (by [`init`](Self::init), [`open`](Self::open) or
/// [`seal`](Self::seal)). Cursors address all columns through a single row
/// index, so they cannot drift apart.
///
/// During setup the series may be populated from many threads at once:
/// [`push_back`](Self::push_back) and [`push_timestamp`](Self::push_timestamp)
/// take `&self` and lock only the column they touch.
pub struct TimeSeries {
    variables: VariableStore,
    dates: RwLock<Vec<Timestamp>>,
    sealed: AtomicBool,
    config: IngestConfig,
    report: Option<IngestReport>,
}

// Compile-time assertion: TimeSeries must be Send + Sync.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<TimeSeries>();
};

impl TimeSeries {
    /// Create an empty, unsealed series with the default ingest config.
    pub fn new() -> Self {
        Self::with_config(IngestConfig::default())
    }

    /// Create an empty series that ingests with `config`.
    pub fn with_config(config: IngestConfig) -> Self {
        Self {
            variables: VariableStore::new(),
            dates: RwLock::new(Vec::new()),
            sealed: AtomicBool::new(false),
            config,
            report: None,
        }
    }

    fn from_loaded(loaded: Loaded, config: IngestConfig) -> Self {
        Self {
            variables: loaded.variables,
            dates: RwLock::new(loaded.dates),
            sealed: AtomicBool::new(true),
            config,
            report: Some(loaded.report),
        }
    }

    // ── Population ─────────────────────────────────────────────────

    /// Register `names`, fix the time index to `timestamps` and pre-allocate
    /// every column to one `0.0` per timestamp. Seals the series.
    ///
    /// Names already present (e.g. from earlier pushes) are kept and resized
    /// with the rest. A name repeated within `names` fails with
    /// [`SeriesError::Insertion`].
    pub fn init<I, S>(&mut self, names: I, timestamps: Vec<Timestamp>) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let size = timestamps.len();
        self.init_with_size(names, timestamps, size)
    }

    /// [`init`](Self::init) with an explicit row count.
    ///
    /// `size` must equal `timestamps.len()`; otherwise the call fails with
    /// [`SeriesError::LengthMismatch`] and the series is unchanged. A
    /// series that is already sealed fails with [`SeriesError::Sealed`].
    pub fn init_with_size<I, S>(
        &mut self,
        names: I,
        timestamps: Vec<Timestamp>,
        size: usize,
    ) -> Result<(), SeriesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_sealed() {
            return Err(SeriesError::Sealed);
        }
        if size != timestamps.len() {
            return Err(SeriesError::LengthMismatch {
                column: TIME_INDEX.to_string(),
                expected: size,
                actual: timestamps.len(),
            });
        }
        let names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        let mut seen = std::collections::HashSet::with_capacity(names.len());
        if let Some(dup) = names.iter().find(|n| !seen.insert(n.as_str())) {
            return Err(SeriesError::Insertion { name: dup.clone() });
        }

        for name in &names {
            self.variables.register(name);
        }
        self.variables.resize_all(size);
        *self.dates.get_mut().unwrap_or_else(PoisonError::into_inner) = timestamps;
        self.sealed.store(true, Ordering::Release);
        debug!(variables = self.variables.len(), rows = size, "initialized series");
        Ok(())
    }

    /// Append `value` to the column `name`.
    ///
    /// Before sealing, an unknown name is registered. After sealing the name
    /// set is frozen and an unknown name fails with
    /// [`SeriesError::UnknownVariable`].
    pub fn push_back(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        if self.is_sealed() {
            self.variables.push_existing(name, value)
        } else {
            self.variables.push_back(name, value);
            Ok(())
        }
    }

    /// Append a timestamp to the time index.
    pub fn push_timestamp(&self, timestamp: Timestamp) {
        self.dates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(timestamp);
    }

    /// Freeze the name set after programmatic population.
    ///
    /// Fails with [`SeriesError::LengthMismatch`] (first offender in
    /// registration order) if any column disagrees with the time index.
    pub fn seal(&self) -> Result<(), SeriesError> {
        self.variables.check_lengths(self.len())?;
        self.sealed.store(true, Ordering::Release);
        Ok(())
    }

    // ── Ingestion & serialization ─────────────────────────────────

    /// Load a delimited file, replacing this series' contents.
    ///
    /// All-or-nothing: the file is parsed into a fresh store and swapped in
    /// only after every check has passed. On error `self` is untouched.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<(), IngestError> {
        let loaded = ingest::load_path(path.as_ref(), &self.config)?;
        *self = Self::from_loaded(loaded, self.config.clone());
        Ok(())
    }

    /// Load a delimited file into a new series with the default config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        Self::from_file_with(path, IngestConfig::default())
    }

    /// Load a delimited file into a new series with `config`.
    pub fn from_file_with(path: impl AsRef<Path>, config: IngestConfig) -> Result<Self, IngestError> {
        let loaded = ingest::load_path(path.as_ref(), &config)?;
        Ok(Self::from_loaded(loaded, config))
    }

    /// Load delimited text from any buffered reader.
    ///
    /// `origin` labels error messages and the [`IngestReport`].
    pub fn from_reader<R: std::io::BufRead>(
        reader: R,
        origin: impl Into<PathBuf>,
        config: IngestConfig,
    ) -> Result<Self, IngestError> {
        let origin: PathBuf = origin.into();
        let loaded = ingest::load(reader, &origin, &config)?;
        Ok(Self::from_loaded(loaded, config))
    }

    /// Write the series to `path` with the default writer config.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), FileIoError> {
        self.to_file_with(path, &WriterConfig::default())
    }

    /// Write the series to `path` with `config`.
    pub fn to_file_with(&self, path: impl AsRef<Path>, config: &WriterConfig) -> Result<(), FileIoError> {
        let path = path.as_ref();
        let to_err = |source| FileIoError {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path).map_err(to_err)?;
        writer::write_series(self, file, config).map_err(to_err)?;
        debug!(path = %path.display(), rows = self.len(), "wrote series");
        Ok(())
    }

    /// Write the series to any sink with `config`.
    pub fn write_to<W: Write>(&self, sink: W, config: &WriterConfig) -> std::io::Result<()> {
        writer::write_series(self, sink, config)
    }

    // ── Traversal & lookup ────────────────────────────────────────

    /// Iterator positioned on row 0.
    pub fn begin(&self) -> SeriesIter<'_> {
        SeriesIter::new(self, 0)
    }

    /// Iterator positioned one past the last row.
    pub fn end(&self) -> SeriesIter<'_> {
        SeriesIter::new(self, self.len())
    }

    /// Every row in order, as cursors.
    pub fn steps(&self) -> Steps<'_> {
        self.begin().until(&self.end())
    }

    /// Iterator positioned on the first row stamped `timestamp`.
    pub fn find(&self, timestamp: Timestamp) -> Result<SeriesIter<'_>, SeriesError> {
        let row = self.position_from(0, timestamp)?;
        Ok(SeriesIter::new(self, row))
    }

    /// The half-open span `[start, one past end)`.
    ///
    /// `end` is searched for from `start`'s row onward; if it does not
    /// occur there the call fails with [`SeriesError::TimestepNotFound`]
    /// rather than running to the end of the series.
    pub fn range(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<(SeriesIter<'_>, SeriesIter<'_>), SeriesError> {
        let first = self.position_from(0, start)?;
        let last = self.position_from(first, end)?;
        Ok((SeriesIter::new(self, first), SeriesIter::new(self, last + 1)))
    }

    fn position_from(&self, from: usize, timestamp: Timestamp) -> Result<usize, SeriesError> {
        let dates = self.dates.read().unwrap_or_else(PoisonError::into_inner);
        dates
            .get(from..)
            .and_then(|tail| tail.iter().position(|&t| t == timestamp))
            .map(|offset| from + offset)
            .ok_or(SeriesError::TimestepNotFound { timestamp })
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Number of rows (time index length).
    pub fn len(&self) -> usize {
        self.dates.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the series has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of `row`, if it exists.
    pub fn timestamp_at(&self, row: usize) -> Option<Timestamp> {
        self.dates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(row)
            .copied()
    }

    /// A copy of the whole time index.
    pub fn date_timeseries(&self) -> Vec<Timestamp> {
        self.dates.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// A copy of one variable's column.
    pub fn time_series(&self, name: &str) -> Result<Vec<f64>, SeriesError> {
        self.variables.get(name)
    }

    /// Variable names in registration order.
    pub fn list_variables(&self) -> Vec<String> {
        self.variables.names()
    }

    /// Number of values stored for `name`.
    pub fn column_len(&self, name: &str) -> Result<usize, SeriesError> {
        self.variables.column_len(name)
    }

    /// Number of registered variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// The underlying store. Crate-private: the store can register and
    /// resize columns, which a sealed series must not expose.
    pub(crate) fn variables(&self) -> &VariableStore {
        &self.variables
    }

    /// Whether the name set is frozen.
    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::Acquire)
    }

    /// Whether the series was loaded from a file.
    pub fn is_open(&self) -> bool {
        self.report.is_some()
    }

    /// The file this series was loaded from.
    pub fn opened_file(&self) -> Option<&Path> {
        self.report.as_ref().map(|r| r.source.as_path())
    }

    /// Statistics from the load, if this series came from a file.
    pub fn report(&self) -> Option<&IngestReport> {
        self.report.as_ref()
    }

    /// The ingest configuration used by [`open`](Self::open).
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TimeSeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSeries")
            .field("variables", &self.variables.names())
            .field("rows", &self.len())
            .field("sealed", &self.is_sealed())
            .field("source", &self.opened_file())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(n: usize) -> Vec<Timestamp> {
        let start = Timestamp::from_ymd_hms(2019, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| start.checked_add_seconds(3600 * i as i64).unwrap())
            .collect()
    }

    #[test]
    fn init_preallocates_every_column() {
        let mut series = TimeSeries::new();
        series.init(["t", "rh", "u"], hourly(5)).unwrap();
        assert!(series.is_sealed());
        assert!(!series.is_open());
        assert_eq!(series.len(), 5);
        for name in ["t", "rh", "u"] {
            assert_eq!(series.time_series(name).unwrap(), vec![0.0; 5]);
        }
    }

    #[test]
    fn init_with_wrong_size_fails_cleanly() {
        let mut series = TimeSeries::new();
        let err = series.init_with_size(["t"], hourly(3), 4).unwrap_err();
        assert!(matches!(err, SeriesError::LengthMismatch { expected: 4, actual: 3, .. }));
        assert!(series.list_variables().is_empty());
        assert!(!series.is_sealed());
    }

    #[test]
    fn init_rejects_repeated_names() {
        let mut series = TimeSeries::new();
        assert_eq!(
            series.init(["t", "t"], hourly(2)),
            Err(SeriesError::Insertion { name: "t".into() })
        );
    }

    #[test]
    fn second_init_on_sealed_series_is_refused() {
        let mut series = TimeSeries::new();
        series.init(["t"], hourly(2)).unwrap();
        series.push_back("t", 1.0).unwrap();
        assert_eq!(series.init(["snow"], hourly(3)), Err(SeriesError::Sealed));
        assert_eq!(series.list_variables(), vec!["t"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.time_series("t").unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn init_on_opened_series_is_refused() {
        let text = "t,datetime\n1.5,20190101T000000\n";
        let mut series =
            TimeSeries::from_reader(text.as_bytes(), "inline", IngestConfig::default()).unwrap();
        assert_eq!(series.init(["snow"], hourly(1)), Err(SeriesError::Sealed));
        assert_eq!(series.list_variables(), vec!["t"]);
        assert_eq!(series.opened_file(), Some(Path::new("inline")));
    }

    #[test]
    fn column_len_reports_without_exposing_the_store() {
        let mut series = TimeSeries::new();
        series.init(["t"], hourly(3)).unwrap();
        assert_eq!(series.column_len("t"), Ok(3));
        assert!(series.column_len("snow").is_err());
        assert_eq!(
            series.push_back("snow", 1.0),
            Err(SeriesError::UnknownVariable {
                name: "snow".into()
            })
        );
        assert_eq!(series.list_variables(), vec!["t"]);
    }

    #[test]
    fn sealed_series_rejects_new_names() {
        let mut series = TimeSeries::new();
        series.init(["t"], hourly(2)).unwrap();
        assert!(series.push_back("t", 1.0).is_ok());
        assert_eq!(
            series.push_back("snow", 1.0),
            Err(SeriesError::UnknownVariable { name: "snow".into() })
        );
        assert_eq!(series.list_variables(), vec!["t"]);
    }

    #[test]
    fn programmatic_population_then_seal() {
        let series = TimeSeries::new();
        for (i, ts) in hourly(3).into_iter().enumerate() {
            series.push_timestamp(ts);
            series.push_back("t", i as f64).unwrap();
        }
        series.push_back("rh", 1.0).unwrap();
        assert!(matches!(
            series.seal(),
            Err(SeriesError::LengthMismatch { ref column, .. }) if column == "rh"
        ));
        series.push_back("rh", 2.0).unwrap();
        series.push_back("rh", 3.0).unwrap();
        series.seal().unwrap();
        assert!(series.is_sealed());
    }

    #[test]
    fn find_locates_exact_timestamp() {
        let mut series = TimeSeries::new();
        let dates = hourly(4);
        series.init(["t"], dates.clone()).unwrap();
        let it = series.find(dates[2]).unwrap();
        assert_eq!(it.row(), 2);

        let missing = Timestamp::from_ymd_hms(1999, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            series.find(missing).unwrap_err(),
            SeriesError::TimestepNotFound { timestamp: missing }
        );
    }

    #[test]
    fn range_is_half_open_and_inclusive_of_end_timestamp() {
        let mut series = TimeSeries::new();
        let dates = hourly(6);
        series.init(["t"], dates.clone()).unwrap();
        let (s, e) = series.range(dates[1], dates[3]).unwrap();
        assert_eq!(s.row(), 1);
        assert_eq!(e.row(), 4);
        assert_eq!(s.distance_to(&e), 3);

        let (s, e) = series.range(dates[5], dates[5]).unwrap();
        assert_eq!(e, series.end());
        assert_eq!(s.distance_to(&e), 1);
    }

    #[test]
    fn range_end_before_start_is_not_found() {
        let mut series = TimeSeries::new();
        let dates = hourly(4);
        series.init(["t"], dates.clone()).unwrap();
        assert_eq!(
            series.range(dates[2], dates[1]).unwrap_err(),
            SeriesError::TimestepNotFound { timestamp: dates[1] }
        );
    }

    #[test]
    fn failed_open_leaves_series_untouched() {
        let mut series = TimeSeries::new();
        series.init(["t"], hourly(2)).unwrap();
        assert!(series.open("/no/such/forcing.txt").is_err());
        assert_eq!(series.list_variables(), vec!["t"]);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn from_reader_records_origin() {
        let text = "t,datetime\n1.5,20190101T000000\n";
        let series =
            TimeSeries::from_reader(text.as_bytes(), "inline", IngestConfig::default()).unwrap();
        assert!(series.is_open());
        assert!(series.is_sealed());
        assert_eq!(series.opened_file(), Some(Path::new("inline")));
        assert_eq!(series.report().map(|r| r.rows), Some(1));
    }
}
