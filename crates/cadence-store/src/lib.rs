//! Keyed-lock variable storage for Cadence time series.
//!
//! A [`VariableStore`] maps variable names to independently growable
//! `f64` columns. Each column sits behind its own lock (see [`keyed`]),
//! so worker threads populating different variables during parallel
//! setup never contend with each other.
//!
//! # Locking discipline
//!
//! Every operation resolves exactly one key, locks it for the duration
//! of that single operation, and releases it through an RAII guard on
//! every exit path. No operation holds two column locks at once, so
//! there is no lock-ordering hazard between keys.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod keyed;
pub mod store;

pub use keyed::{KeyGuard, KeyHandle, KeyedMap};
pub use store::{ColumnHandle, VariableStore};
