//! Core types and traits for the Cadence forcing store.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by the rest of the workspace:
//! the [`Timestamp`] row key, the error taxonomy, and the narrow
//! read/write traits through which simulation modules touch a row.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod timestamp;
pub mod traits;

pub use error::{ConfigError, FileIoError, IngestError, SeriesError};
pub use timestamp::{is_compact_iso, Timestamp, TimestampParseError, COMPACT_ISO_FORMAT};
pub use traits::{VariableReader, VariableWriter};
