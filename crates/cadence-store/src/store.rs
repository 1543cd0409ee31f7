//! The [`VariableStore`]: named `f64` columns with per-column locking.

use cadence_core::SeriesError;
use tracing::trace;

use crate::keyed::{KeyHandle, KeyedMap};

/// Shared handle to one variable column.
pub type ColumnHandle = KeyHandle<Vec<f64>>;

/// A mapping from variable name to an independently growable column.
///
/// All methods take `&self`; synchronization is per column. The store does
/// not enforce equal column lengths while it is being populated; call
/// [`check_lengths`](Self::check_lengths) once population is complete.
#[derive(Default)]
pub struct VariableStore {
    columns: KeyedMap<Vec<f64>>,
}

impl VariableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` if absent and return its column.
    ///
    /// Idempotent: a second call (from any thread) returns the existing
    /// column unchanged.
    pub fn register(&self, name: &str) -> ColumnHandle {
        let (handle, inserted) = self.columns.get_or_insert_with(name, Vec::new);
        if inserted {
            trace!(variable = name, "registered column");
        }
        handle
    }

    /// Register `name`, failing if it is already present.
    ///
    /// Used where names come from a source that must be unique, such as a
    /// file header.
    pub fn register_new(&self, name: &str) -> Result<ColumnHandle, SeriesError> {
        match self.columns.get_or_insert_with(name, Vec::new) {
            (handle, true) => Ok(handle),
            (_, false) => Err(SeriesError::Insertion {
                name: name.to_string(),
            }),
        }
    }

    /// Handle to an existing column.
    pub fn handle(&self, name: &str) -> Result<ColumnHandle, SeriesError> {
        self.columns
            .get(name)
            .ok_or_else(|| SeriesError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// A copy of the named column.
    pub fn get(&self, name: &str) -> Result<Vec<f64>, SeriesError> {
        self.with_column(name, <[f64]>::to_vec)
    }

    /// Run `f` on the named column in place, under its lock.
    pub fn with_column<R>(&self, name: &str, f: impl FnOnce(&[f64]) -> R) -> Result<R, SeriesError> {
        self.columns
            .with(name, |col| f(col.as_slice()))
            .ok_or_else(|| SeriesError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Append `value` to `name`, registering the column if needed.
    pub fn push_back(&self, name: &str, value: f64) {
        self.register(name).lock().push(value);
    }

    /// Append `value` to an already-registered column.
    pub fn push_existing(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        self.handle(name)?.lock().push(value);
        Ok(())
    }

    /// Resize every registered column to `n`; new slots are `0.0`.
    pub fn resize_all(&self, n: usize) {
        for (_, handle) in self.columns.entries() {
            handle.lock().resize(n, 0.0);
        }
    }

    /// Value of `name` at `row`.
    pub fn value_at(&self, name: &str, row: usize) -> Result<f64, SeriesError> {
        let handle = self.handle(name)?;
        let col = handle.lock();
        col.get(row).copied().ok_or(SeriesError::RowOutOfRange {
            row,
            len: col.len(),
        })
    }

    /// Overwrite `name` at `row`.
    pub fn set_at(&self, name: &str, row: usize, value: f64) -> Result<(), SeriesError> {
        let handle = self.handle(name)?;
        let mut col = handle.lock();
        let len = col.len();
        match col.get_mut(row) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SeriesError::RowOutOfRange { row, len }),
        }
    }

    /// Length of the named column.
    pub fn column_len(&self, name: &str) -> Result<usize, SeriesError> {
        self.with_column(name, <[f64]>::len)
    }

    /// Drop a column. Returns whether it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.columns.remove(name).is_some()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Variable names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.columns.keys()
    }

    /// `(name, handle)` pairs in registration order.
    pub fn columns(&self) -> Vec<(String, ColumnHandle)> {
        self.columns.entries()
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no variable is registered.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Verify every column has exactly `expected` rows.
    ///
    /// Reports the first offender in registration order.
    pub fn check_lengths(&self, expected: usize) -> Result<(), SeriesError> {
        for (name, handle) in self.columns.entries() {
            let actual = handle.lock().len();
            if actual != expected {
                return Err(SeriesError::LengthMismatch {
                    column: name,
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for VariableStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariableStore")
            .field("variables", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variable_is_a_lookup_error() {
        let store = VariableStore::new();
        assert_eq!(
            store.get("t"),
            Err(SeriesError::UnknownVariable { name: "t".into() })
        );
        assert!(store.push_existing("t", 1.0).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn push_back_registers_and_appends() {
        let store = VariableStore::new();
        store.push_back("t", 1.0);
        store.push_back("t", 2.0);
        store.push_back("rh", 50.0);
        assert_eq!(store.get("t").unwrap(), vec![1.0, 2.0]);
        assert_eq!(store.names(), vec!["t", "rh"]);
    }

    #[test]
    fn register_new_rejects_duplicates() {
        let store = VariableStore::new();
        store.register_new("t").unwrap();
        assert_eq!(
            store.register_new("t").unwrap_err(),
            SeriesError::Insertion { name: "t".into() }
        );
    }

    #[test]
    fn resize_all_preallocates_zeroes() {
        let store = VariableStore::new();
        store.register("a");
        store.push_back("b", 9.0);
        store.resize_all(4);
        assert_eq!(store.get("a").unwrap(), vec![0.0; 4]);
        assert_eq!(store.get("b").unwrap(), vec![9.0, 0.0, 0.0, 0.0]);
        assert!(store.check_lengths(4).is_ok());
    }

    #[test]
    fn row_access_is_bounds_checked() {
        let store = VariableStore::new();
        store.push_back("t", 1.5);
        assert_eq!(store.value_at("t", 0), Ok(1.5));
        assert_eq!(
            store.value_at("t", 1),
            Err(SeriesError::RowOutOfRange { row: 1, len: 1 })
        );
        store.set_at("t", 0, -3.0).unwrap();
        assert_eq!(store.value_at("t", 0), Ok(-3.0));
        assert!(store.set_at("t", 5, 0.0).is_err());
    }

    #[test]
    fn check_lengths_reports_first_offender() {
        let store = VariableStore::new();
        store.push_back("a", 1.0);
        store.push_back("b", 1.0);
        store.push_back("b", 2.0);
        store.push_back("c", 1.0);
        assert_eq!(
            store.check_lengths(1),
            Err(SeriesError::LengthMismatch {
                column: "b".into(),
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn remove_forgets_column() {
        let store = VariableStore::new();
        store.push_back("datetime", 0.0);
        store.push_back("t", 0.0);
        assert!(store.remove("datetime"));
        assert!(!store.contains("datetime"));
        assert_eq!(store.names(), vec!["t"]);
        assert!(!store.remove("datetime"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn column_len_tracks_pushes(
                ops in proptest::collection::vec((0usize..4, -1e6f64..1e6), 0..64),
            ) {
                let names = ["a", "b", "c", "d"];
                let store = VariableStore::new();
                let mut expected = [0usize; 4];
                for &(k, v) in &ops {
                    store.push_back(names[k], v);
                    expected[k] += 1;
                }
                for (k, name) in names.iter().enumerate() {
                    if expected[k] == 0 {
                        prop_assert!(!store.contains(name));
                    } else {
                        prop_assert_eq!(store.column_len(name).unwrap(), expected[k]);
                    }
                }
            }
        }
    }
}
