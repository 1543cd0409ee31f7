//! Integration test: module code written against the row traits runs the
//! same on a real series and on a mock, and parallel setup through `&self`
//! loses nothing.

use std::thread;

use cadence_core::{SeriesError, VariableReader, VariableWriter};
use cadence_series::{IngestConfig, TimeSeries};
use cadence_test_utils::fixtures::{hourly, MINIMAL_STATION};
use cadence_test_utils::MockStep;

/// A toy physics step: relative humidity drops by the temperature.
fn dry_out<S: VariableReader + VariableWriter>(step: &S) -> Result<(), SeriesError> {
    let t = step.get("t")?;
    let rh = step.get("rh")?;
    step.set("rh", rh - t)
}

#[test]
fn generic_module_runs_on_timesteps() {
    let series =
        TimeSeries::from_reader(MINIMAL_STATION.as_bytes(), "station", IngestConfig::default())
            .unwrap();
    for step in series.steps() {
        dry_out(&step).unwrap();
    }
    assert_eq!(series.time_series("rh").unwrap(), vec![49.0, 53.0]);
}

#[test]
fn generic_module_runs_on_mocks() {
    let step = MockStep::new(hourly(1)[0])
        .with_var("t", 2.0)
        .with_var("rh", 60.0);
    dry_out(&step).unwrap();
    assert_eq!(step.value("rh"), Some(58.0));

    let missing = MockStep::new(hourly(1)[0]).with_var("t", 2.0);
    assert_eq!(
        dry_out(&missing),
        Err(SeriesError::UnknownVariable { name: "rh".into() })
    );
}

#[test]
fn parallel_population_then_seal() {
    const ROWS: usize = 200;
    let series = TimeSeries::new();
    for ts in hourly(ROWS) {
        series.push_timestamp(ts);
    }

    thread::scope(|s| {
        for var in 0..8 {
            let series = &series;
            s.spawn(move || {
                let name = format!("v{var}");
                for row in 0..ROWS {
                    series.push_back(&name, (var * ROWS + row) as f64).unwrap();
                }
            });
        }
    });

    series.seal().unwrap();
    assert_eq!(series.variable_count(), 8);
    for var in 0..8 {
        let column = series.time_series(&format!("v{var}")).unwrap();
        let expected: Vec<f64> = (0..ROWS).map(|row| (var * ROWS + row) as f64).collect();
        assert_eq!(column, expected);
    }
}
