//! Benchmark profiles for the Cadence forcing store.
//!
//! - [`station_profile`]: one year of hourly data for a typical station
//!   (8 variables, 8760 rows), pre-initialized in memory
//! - [`station_file_text`]: the same shape as delimited text, for
//!   ingestion benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cadence_core::SeriesError;
use cadence_series::TimeSeries;
use cadence_test_utils::fixtures::{hourly, station_text, station_value};

/// Variables in the reference station.
pub const STATION_VARS: usize = 8;

/// Hourly rows in one non-leap year.
pub const STATION_ROWS: usize = 24 * 365;

/// An initialized series of `vars` columns named `v0..` by `rows` hourly
/// rows, filled with deterministic values.
pub fn series_profile(vars: usize, rows: usize) -> Result<TimeSeries, SeriesError> {
    let names: Vec<String> = (0..vars).map(|v| format!("v{v}")).collect();
    let mut series = TimeSeries::new();
    series.init(&names, hourly(rows))?;
    for step in series.steps() {
        for (v, name) in names.iter().enumerate() {
            step.set(name, station_value(v, step.row()))?;
        }
    }
    Ok(series)
}

/// The reference station profile.
pub fn station_profile() -> Result<TimeSeries, SeriesError> {
    series_profile(STATION_VARS, STATION_ROWS)
}

/// The reference station as tab-separated text.
pub fn station_file_text() -> String {
    station_text(STATION_VARS, STATION_ROWS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_has_expected_shape() {
        let series = series_profile(3, 10).unwrap();
        assert_eq!(series.len(), 10);
        assert_eq!(series.list_variables(), vec!["v0", "v1", "v2"]);
        assert_eq!(series.time_series("v2").unwrap()[4], station_value(2, 4));
    }
}
