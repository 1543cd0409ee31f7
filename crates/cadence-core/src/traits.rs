//! Row access traits consumed by simulation modules.
//!
//! Physics modules read forcing values and write outputs for "the current
//! timestep" of the element they run on. They do so through these traits
//! rather than a concrete cursor type, so module code can be exercised
//! against mocks without building a full series.

use crate::error::SeriesError;
use crate::timestamp::Timestamp;

/// Read-only access to the variables of one row.
pub trait VariableReader {
    /// Value of `name` at this row.
    ///
    /// Fails with [`SeriesError::UnknownVariable`] if the name was never
    /// registered.
    fn get(&self, name: &str) -> Result<f64, SeriesError>;

    /// The instant this row represents.
    fn timestamp(&self) -> Timestamp;
}

/// Write access to the variables of one row.
///
/// Takes `&self`: implementations synchronize internally so a row handle
/// can be shared with helpers that only hold a shared reference.
pub trait VariableWriter {
    /// Overwrite the value of `name` at this row.
    ///
    /// Never changes the row count or position.
    fn set(&self, name: &str, value: f64) -> Result<(), SeriesError>;
}
