//! Canned and generated forcing files.

use std::fmt::Write as _;
use std::io::Write as _;

use cadence_core::Timestamp;
use tempfile::NamedTempFile;

/// A small station file: comma separated, date column last.
pub const MINIMAL_STATION: &str = "t,rh,datetime\n\
1.0,50.0,20190101T000000\n\
2.0,55.0,20190101T010000\n";

/// Whitespace separated, date column first, with blank lines.
pub const SPACED_STATION: &str = "\n\
Date    t     rh    u\n\
20190315T060000  -1.5  80  2.25\n\
\n\
20190315T070000  -1.0  82  3\n\
20190315T080000  0.5e1  79.5  .5\n";

/// Header promises three columns, the row has two.
pub const SHORT_ROW: &str = "a,b,datetime\n1.0,2.0\n";

/// `n` hourly timestamps starting at 2019-01-01T00:00:00.
pub fn hourly(n: usize) -> Vec<Timestamp> {
    let start = Timestamp::from_ymd_hms(2019, 1, 1, 0, 0, 0).expect("valid start");
    (0..n)
        .map(|i| {
            start
                .checked_add_seconds(3600 * i as i64)
                .expect("timestamp in range")
        })
        .collect()
}

/// Deterministic value of variable `var` at row `row`.
///
/// Values are multiples of 1/8 so they survive any text round trip.
pub fn station_value(var: usize, row: usize) -> f64 {
    ((var * 31 + row * 7) % 400) as f64 / 8.0 - 20.0
}

/// A station file with `vars` numeric columns named `v0..` and `rows`
/// hourly rows, date column first, tab separated.
pub fn station_text(vars: usize, rows: usize) -> String {
    let mut text = String::from("datetime");
    for v in 0..vars {
        let _ = write!(text, "\tv{v}");
    }
    text.push('\n');
    for (row, ts) in hourly(rows).into_iter().enumerate() {
        let _ = write!(text, "{ts}");
        for v in 0..vars {
            let _ = write!(text, "\t{}", station_value(v, row));
        }
        text.push('\n');
    }
    text
}

/// Write `contents` to a fresh temporary file.
///
/// The file is removed when the returned handle is dropped.
pub fn write_fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}
