//! Criterion micro-benchmarks for ingestion, traversal, lookup and
//! serialization.

use std::hint::black_box;

use cadence_bench::{station_file_text, station_profile, STATION_ROWS};
use cadence_series::{IngestConfig, TimeSeries, WriterConfig};
use cadence_test_utils::fixtures::hourly;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_ingest_station_year(c: &mut Criterion) {
    let text = station_file_text();
    c.bench_function("ingest_station_year", |b| {
        b.iter(|| {
            let series =
                TimeSeries::from_reader(text.as_bytes(), "bench", IngestConfig::default())
                    .unwrap();
            black_box(series.len());
        });
    });
}

fn bench_traverse_read_all(c: &mut Criterion) {
    let series = station_profile().unwrap();
    let names = series.list_variables();
    c.bench_function("traverse_read_all", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for step in series.steps() {
                for name in &names {
                    sum += step.get(name).unwrap();
                }
            }
            black_box(sum);
        });
    });
}

fn bench_traverse_write_one(c: &mut Criterion) {
    let series = station_profile().unwrap();
    c.bench_function("traverse_write_one", |b| {
        b.iter(|| {
            for step in series.steps() {
                step.set("v0", step.row() as f64).unwrap();
            }
        });
    });
}

fn bench_find_last_row(c: &mut Criterion) {
    let series = station_profile().unwrap();
    let last = hourly(STATION_ROWS)[STATION_ROWS - 1];
    c.bench_function("find_last_row", |b| {
        b.iter(|| {
            let it = series.find(black_box(last)).unwrap();
            black_box(it.row());
        });
    });
}

fn bench_write_station_year(c: &mut Criterion) {
    let series = station_profile().unwrap();
    let config = WriterConfig::default();
    c.bench_function("write_station_year", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1 << 20);
            series.write_to(&mut buf, &config).unwrap();
            black_box(buf.len());
        });
    });
}

criterion_group!(
    benches,
    bench_ingest_station_year,
    bench_traverse_read_all,
    bench_traverse_write_one,
    bench_find_last_row,
    bench_write_station_year
);
criterion_main!(benches);
