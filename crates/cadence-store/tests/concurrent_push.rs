//! Integration test: concurrent population of a shared store.
//!
//! Worker threads each own a subset of variables and push into the same
//! store at once. Every push must land exactly once, and registration
//! races on a shared name must never duplicate the column.

use std::sync::Barrier;
use std::thread;

use cadence_store::VariableStore;

const PUSHES_PER_THREAD: usize = 2_000;

#[test]
fn distinct_names_lose_no_updates() {
    let store = VariableStore::new();
    let barrier = Barrier::new(2);

    thread::scope(|s| {
        for name in ["t", "rh"] {
            let store = &store;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..PUSHES_PER_THREAD {
                    store.push_back(name, i as f64);
                }
            });
        }
    });

    for name in ["t", "rh"] {
        let col = store.get(name).unwrap();
        assert_eq!(col.len(), PUSHES_PER_THREAD);
        // Single writer per name: order is preserved.
        assert!(col.iter().enumerate().all(|(i, &v)| v == i as f64));
    }
}

#[test]
fn same_name_pushes_serialize() {
    let store = VariableStore::new();
    let threads = 8;
    let barrier = Barrier::new(threads);

    thread::scope(|s| {
        for worker in 0..threads {
            let store = &store;
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for _ in 0..PUSHES_PER_THREAD {
                    store.push_back("shared", worker as f64);
                }
            });
        }
    });

    assert_eq!(store.len(), 1);
    let col = store.get("shared").unwrap();
    assert_eq!(col.len(), threads * PUSHES_PER_THREAD);
    for worker in 0..threads {
        let count = col.iter().filter(|&&v| v == worker as f64).count();
        assert_eq!(count, PUSHES_PER_THREAD, "worker {worker} lost pushes");
    }
}

#[test]
fn parallel_setup_then_resize() {
    let store = VariableStore::new();
    let names: Vec<String> = (0..32).map(|i| format!("var_{i}")).collect();

    thread::scope(|s| {
        for chunk in names.chunks(8) {
            let store = &store;
            s.spawn(move || {
                for name in chunk {
                    store.register(name);
                    // Re-registering from the same thread is a no-op.
                    store.register(name);
                }
            });
        }
    });

    assert_eq!(store.len(), names.len());
    store.resize_all(24);
    assert!(store.check_lengths(24).is_ok());
}
