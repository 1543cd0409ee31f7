//! A string-keyed map with one lock per entry.
//!
//! [`KeyedMap`] keeps a directory of `Arc<Mutex<V>>` shards behind a
//! `RwLock`. The directory lock is held only while resolving or
//! inserting a key; the shard lock is then taken on its own. Callers
//! receive a [`KeyHandle`] they can lock repeatedly without touching
//! the directory again.
//!
//! Poisoned locks are recovered rather than propagated: the stored
//! values are plain data with no invariants a panicking writer could
//! leave half-applied.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use indexmap::IndexMap;

/// Shared handle to one entry of a [`KeyedMap`].
///
/// Cloning is cheap (an `Arc` bump). A handle stays valid after its key
/// is removed from the map; it simply no longer aliases anything the
/// map can reach.
pub struct KeyHandle<V> {
    inner: Arc<Mutex<V>>,
}

impl<V> KeyHandle<V> {
    fn new(value: V) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Acquire this entry's lock, blocking until it is free.
    pub fn lock(&self) -> KeyGuard<'_, V> {
        KeyGuard {
            guard: self.inner.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    /// Whether two handles refer to the same entry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<V> Clone for KeyHandle<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> std::fmt::Debug for KeyHandle<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyHandle")
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}

/// Scoped access to one entry. The lock is released on drop.
pub struct KeyGuard<'a, V> {
    guard: MutexGuard<'a, V>,
}

impl<V> Deref for KeyGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.guard
    }
}

impl<V> DerefMut for KeyGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.guard
    }
}

/// A map from names to independently locked values.
///
/// Iteration order is insertion order (`IndexMap`), which downstream
/// code relies on for stable file headers.
pub struct KeyedMap<V> {
    directory: RwLock<IndexMap<String, KeyHandle<V>>>,
}

// Compile-time assertion: KeyedMap must be Send + Sync for Send values.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<KeyedMap<Vec<f64>>>();
};

impl<V> KeyedMap<V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            directory: RwLock::new(IndexMap::new()),
        }
    }

    /// Return the handle for `key`, inserting `init()` if it is absent.
    ///
    /// The boolean is `true` if this call performed the insertion. Two
    /// threads racing on the same absent key both receive the same
    /// handle; exactly one of them sees `true`.
    pub fn get_or_insert_with(&self, key: &str, init: impl FnOnce() -> V) -> (KeyHandle<V>, bool) {
        if let Some(handle) = self.get(key) {
            return (handle, false);
        }
        let mut dir = self.directory.write().unwrap_or_else(PoisonError::into_inner);
        // Re-check: another writer may have inserted between the two locks.
        if let Some(handle) = dir.get(key) {
            return (handle.clone(), false);
        }
        let handle = KeyHandle::new(init());
        dir.insert(key.to_string(), handle.clone());
        (handle, true)
    }

    /// Look up the handle for `key`.
    pub fn get(&self, key: &str) -> Option<KeyHandle<V>> {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Run `f` on the value for `key` under its lock.
    ///
    /// Returns `None` if the key is absent. The directory lock is released
    /// before the entry lock is taken.
    pub fn with<R>(&self, key: &str, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let handle = self.get(key)?;
        let mut guard = handle.lock();
        Some(f(&mut guard))
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&self, key: &str) -> Option<KeyHandle<V>> {
        self.directory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// A point-in-time copy of every `(key, handle)` pair in insertion order.
    ///
    /// Callers iterate the snapshot and lock entries one at a time, which
    /// keeps the single-key discipline during whole-map sweeps.
    pub fn entries(&self) -> Vec<(String, KeyHandle<V>)> {
        self.directory
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, h)| (k.clone(), h.clone()))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.directory.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for KeyedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
