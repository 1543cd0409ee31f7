//! Cadence: a time-indexed forcing store for physically based models.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Cadence sub-crates. For most users, adding `cadence` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cadence::prelude::*;
//!
//! let text = "t,rh,datetime\n\
//!             1.0,50.0,20190101T000000\n\
//!             2.0,55.0,20190101T010000\n";
//! let series = TimeSeries::from_reader(text.as_bytes(), "station", IngestConfig::default())?;
//!
//! // Every cursor reads all variables at the same row.
//! let it = series.find("20190101T010000".parse()?)?;
//! assert_eq!(it.get("t")?, 2.0);
//!
//! // Modules mutate forcing in place through the row traits.
//! fn warm<S: VariableReader + VariableWriter>(row: &S) -> Result<(), SeriesError> {
//!     row.set("t", row.get("t")? + 0.5)
//! }
//! for step in series.steps() {
//!     warm(&step)?;
//! }
//! assert_eq!(series.time_series("t")?, vec![1.5, 2.5]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cadence-core` | `Timestamp`, errors, row traits |
//! | [`store`] | `cadence-store` | Keyed-lock variable storage |
//! | [`series`] | `cadence-series` | `TimeSeries`, cursors, file I/O, configs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, errors, and row traits (`cadence-core`).
///
/// Contains the [`types::Timestamp`] row key, the error taxonomy, and the
/// [`types::VariableReader`] / [`types::VariableWriter`] traits.
pub use cadence_core as types;

/// Keyed-lock variable storage (`cadence-store`).
///
/// [`store::VariableStore`] maps names to independently locked columns.
pub use cadence_store as store;

/// Time series, cursors, ingestion, and serialization (`cadence-series`).
pub use cadence_series as series;

/// Common imports for typical Cadence usage.
///
/// ```rust
/// use cadence::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use cadence_core::{Timestamp, VariableReader, VariableWriter};

    // Errors
    pub use cadence_core::{ConfigError, FileIoError, IngestError, SeriesError};

    // Series and cursors
    pub use cadence_series::{
        IngestConfig, IngestReport, SeriesIter, Steps, TimeSeries, Timestep, WriterConfig,
    };
}
