//! Cadence Quickstart: load a station file, run a toy module over it,
//! and write the result back out.
//!
//! Demonstrates:
//!   1. Installing a `tracing` subscriber to see load diagnostics
//!   2. Opening a delimited station file
//!   3. Walking the series with cursors and mutating in place
//!   4. Looking up rows and spans by timestamp
//!   5. Serializing and re-reading the result
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use std::error::Error;
use std::io::Write;

use cadence::prelude::*;
use tracing_subscriber::EnvFilter;

// ─── Input ──────────────────────────────────────────────────────

const STATION: &str = "\
Date            t      rh    u
20190315T060000 -1.5   80    2.0
20190315T070000 -1.0   82    2.5
20190315T080000  0.5   79    3.0
20190315T090000  2.0   74    3.5
20190315T100000  3.5   70    3.0
";

// ─── Module: a crude degree-hour accumulator ────────────────────
//
// Reads air temperature and writes a running sum of positive
// degree-hours through the row traits.

fn degree_hours<S: VariableReader + VariableWriter>(
    row: &S,
    running: &mut f64,
) -> Result<(), SeriesError> {
    *running += row.get("t")?.max(0.0);
    row.set("pdd", *running)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dir = tempfile::tempdir()?;
    let input = dir.path().join("station.txt");
    std::fs::File::create(&input)?.write_all(STATION.as_bytes())?;

    // ── Load ────────────────────────────────────────────────────
    let mut series = TimeSeries::new();
    series.open(&input)?;
    if let Some(report) = series.report() {
        println!(
            "loaded {} rows x {} variables in {} us (date column: {:?})",
            report.rows, report.variables, report.elapsed_us, report.date_column
        );
    }

    // ── Add an output column and run the module ─────────────────
    // The name set is frozen after open, so rebuild with the extra column.
    let mut names = series.list_variables();
    names.push("pdd".to_string());
    let mut output = TimeSeries::new();
    output.init(&names, series.date_timeseries())?;
    for (src, dst) in series.steps().zip(output.steps()) {
        for name in series.list_variables() {
            dst.set(&name, src.get(&name)?)?;
        }
    }

    let mut running = 0.0;
    for step in output.steps() {
        degree_hours(&step, &mut running)?;
        println!(
            "{} {:>2}/{:>2} {}",
            step.timestamp(),
            step.month(),
            step.day(),
            step
        );
    }

    // ── Lookup ──────────────────────────────────────────────────
    let morning: Timestamp = "20190315T080000".parse()?;
    let it = output.find(morning)?;
    println!("t at {morning}: {}", it.get("t")?);

    let (start, end) = output.range(morning, "20190315T100000".parse()?)?;
    let mean_rh: f64 = start
        .until(&end)
        .map(|s| s.get("rh"))
        .sum::<Result<f64, _>>()?
        / start.distance_to(&end) as f64;
    println!("mean rh over last three hours: {mean_rh:.2}");

    // ── Write and re-read ───────────────────────────────────────
    let out = dir.path().join("station_pdd.txt");
    output.to_file(&out)?;
    let reread = TimeSeries::from_file(&out)?;
    assert_eq!(reread.time_series("pdd")?, output.time_series("pdd")?);
    println!("wrote {}", out.display());

    Ok(())
}
