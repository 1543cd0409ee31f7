//! Time-indexed forcing series for Cadence.
//!
//! A [`TimeSeries`] holds any number of named `f64` variables that share
//! one time index. It is populated either programmatically
//! ([`TimeSeries::init`], [`TimeSeries::push_back`]) or from a delimited
//! text file ([`TimeSeries::open`]), and it is walked with cursors:
//!
//! - [`SeriesIter`] is a movable position with `begin`/`end` semantics;
//! - [`Timestep`] is the row under a position, exposing every variable
//!   plus the row's [`Timestamp`](cadence_core::Timestamp) and calendar
//!   fields;
//! - [`Steps`] is a standard Rust iterator over a span of rows.
//!
//! All cursors address the columns through a single row index, so the
//! variables are always observed in lock-step.
//!
//! # File format
//!
//! Input files have a header line of variable names followed by data
//! lines. Tokens are split on whitespace and the configured
//! [`IngestConfig::separators`]. Each data token is either a decimal
//! number or a compact ISO-8601 timestamp (`20190315T060000`); the column
//! holding timestamps becomes the time index and is not a variable.
//!
//! ```
//! use cadence_series::{IngestConfig, TimeSeries};
//!
//! let text = "datetime,t,rh\n\
//!             20190315T060000,-1.5,80\n\
//!             20190315T070000,-1.0,82\n";
//! let series = TimeSeries::from_reader(text.as_bytes(), "inline", IngestConfig::default())?;
//!
//! assert_eq!(series.list_variables(), vec!["t", "rh"]);
//! let temps: Vec<f64> = series.steps().map(|s| s.get("t")).collect::<Result<_, _>>()?;
//! assert_eq!(temps, vec![-1.5, -1.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
mod ingest;
pub mod iter;
pub mod report;
pub mod series;
pub mod timestep;
mod writer;

pub use config::{IngestConfig, WriterConfig};
pub use iter::{SeriesIter, Steps};
pub use report::IngestReport;
pub use series::TimeSeries;
pub use timestep::Timestep;
