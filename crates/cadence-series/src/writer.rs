//! Delimited-text serialization.
//!
//! Output layout, with the default [`WriterConfig`]:
//!
//! ```text
//! Date            t       rh
//! 20190101T000000 1.5     80
//! 20190101T010000 -0.25   81
//! ```
//!
//! (fields are separated by a single delimiter character; the alignment
//! above is illustrative). Every row carries its own timestamp, and values
//! use the shortest representation that reads back to the same `f64`.
//! A variable whose name equals the configured date header is refused,
//! since the output could not be read back.

use std::io::{self, BufWriter, Write};

use cadence_core::SeriesError;

use crate::config::WriterConfig;
use crate::series::TimeSeries;

pub(crate) fn write_series<W: Write>(
    series: &TimeSeries,
    sink: W,
    config: &WriterConfig,
) -> io::Result<()> {
    config
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let dates = series.date_timeseries();

    // Snapshot one column at a time so no two column locks are held together.
    let columns: Vec<(String, Vec<f64>)> = series
        .variables()
        .columns()
        .into_iter()
        .map(|(name, handle)| {
            let values = handle.lock().clone();
            (name, values)
        })
        .collect();

    // Validated on the snapshot so a concurrent resize cannot invalidate it.
    for (name, values) in &columns {
        if name == &config.date_header {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("variable '{name}' collides with the date header"),
            ));
        }
        if values.len() != dates.len() {
            let mismatch = SeriesError::LengthMismatch {
                column: name.clone(),
                expected: dates.len(),
                actual: values.len(),
            };
            return Err(io::Error::new(io::ErrorKind::InvalidData, mismatch));
        }
    }

    let mut out = BufWriter::new(sink);
    let delim = config.delimiter;

    write!(out, "{}", config.date_header)?;
    for (name, _) in &columns {
        write!(out, "{delim}{name}")?;
    }
    writeln!(out)?;

    for (row, timestamp) in dates.iter().enumerate() {
        write!(out, "{timestamp}")?;
        for (_, values) in &columns {
            write!(out, "{delim}{}", values[row])?;
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Timestamp;

    fn render(series: &TimeSeries, config: &WriterConfig) -> io::Result<String> {
        let mut buf = Vec::new();
        write_series(series, &mut buf, config)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    fn two_rows() -> TimeSeries {
        let t0 = Timestamp::from_ymd_hms(2019, 1, 1, 0, 0, 0).unwrap();
        let t1 = Timestamp::from_ymd_hms(2019, 1, 1, 1, 0, 0).unwrap();
        let mut series = TimeSeries::new();
        series.init(["t", "rh"], vec![t0, t1]).unwrap();
        let mut it = series.begin();
        it.set("t", 1.5).unwrap();
        it.set("rh", 80.0).unwrap();
        it.increment();
        it.set("t", -0.25).unwrap();
        it.set("rh", 81.0).unwrap();
        series
    }

    #[test]
    fn writes_header_and_row_timestamps() {
        let text = render(&two_rows(), &WriterConfig::default()).unwrap();
        assert_eq!(
            text,
            "Date\tt\trh\n\
             20190101T000000\t1.5\t80\n\
             20190101T010000\t-0.25\t81\n"
        );
    }

    #[test]
    fn honours_custom_delimiter_and_header() {
        let config = WriterConfig {
            delimiter: ',',
            date_header: "datetime".into(),
        };
        let text = render(&two_rows(), &config).unwrap();
        assert!(text.starts_with("datetime,t,rh\n20190101T000000,1.5,80\n"));
    }

    #[test]
    fn empty_series_writes_only_the_header() {
        let text = render(&TimeSeries::new(), &WriterConfig::default()).unwrap();
        assert_eq!(text, "Date\n");
    }

    #[test]
    fn ragged_series_is_refused() {
        let series = two_rows();
        series.push_back("t", 9.0).unwrap();
        let err = render(&series, &WriterConfig::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn variable_named_like_date_header_is_refused() {
        let series = TimeSeries::new();
        series.push_timestamp(Timestamp::from_ymd_hms(2019, 1, 1, 0, 0, 0).unwrap());
        series.push_back("Date", 1.0).unwrap();
        series.seal().unwrap();
        let err = render(&series, &WriterConfig::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let config = WriterConfig {
            date_header: "when".into(),
            ..WriterConfig::default()
        };
        assert_eq!(render(&series, &config).unwrap(), "when\tDate\n20190101T000000\t1\n");
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = WriterConfig {
            delimiter: '-',
            ..WriterConfig::default()
        };
        let err = render(&two_rows(), &config).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
