//! Test utilities and mock types for Cadence development.
//!
//! Provides [`MockStep`], a stand-alone implementation of the row traits
//! ([`VariableReader`], [`VariableWriter`]), and the [`fixtures`] module
//! with canned and generated forcing files.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use cadence_core::{SeriesError, Timestamp, VariableReader, VariableWriter};

/// Mock row implementing [`VariableReader`] and [`VariableWriter`].
///
/// Backed by a `HashMap<String, f64>` behind a mutex so that `set` can
/// take `&self` like the real cursor. Only names added with
/// [`with_var`](MockStep::with_var) or [`insert`](MockStep::insert) are
/// known; anything else fails with [`SeriesError::UnknownVariable`].
pub struct MockStep {
    values: Mutex<HashMap<String, f64>>,
    timestamp: Timestamp,
}

impl MockStep {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            timestamp,
        }
    }

    /// Builder form of [`insert`](MockStep::insert).
    pub fn with_var(self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&self, name: &str, value: f64) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), value);
    }

    /// Read back a value for assertions, bypassing the trait.
    pub fn value(&self, name: &str) -> Option<f64> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    pub fn var_count(&self) -> usize {
        self.values.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl VariableReader for MockStep {
    fn get(&self, name: &str) -> Result<f64, SeriesError> {
        self.value(name).ok_or_else(|| SeriesError::UnknownVariable {
            name: name.to_string(),
        })
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

impl VariableWriter for MockStep {
    fn set(&self, name: &str, value: f64) -> Result<(), SeriesError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        match values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SeriesError::UnknownVariable {
                name: name.to_string(),
            }),
        }
    }
}
