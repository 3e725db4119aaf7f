use std::sync::{Arc, Barrier};
use std::thread;

use typed_atomics::AtomicLazyReference;

#[test]
fn racing_initializers_agree_on_one_winner() {
    const THREADS: usize = 8;

    let lazy = AtomicLazyReference::new();
    let barrier = Barrier::new(THREADS);

    let results: Vec<Arc<usize>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|id| {
                let lazy = &lazy;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    lazy.store_if_none(Arc::new(id))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winner = lazy.load().expect("a value was published");
    assert!(*winner < THREADS);
    for r in &results {
        assert!(Arc::ptr_eq(r, &winner));
    }
    // One count per result, one for `winner`, one held by `lazy`.
    assert_eq!(Arc::strong_count(&winner), THREADS + 2);
}

#[test]
fn losing_candidates_are_released() {
    let lazy = AtomicLazyReference::new();
    let first = Arc::new(String::from("first"));
    let loser = Arc::new(String::from("loser"));

    let published = lazy.store_if_none(Arc::clone(&first));
    assert!(Arc::ptr_eq(&published, &first));

    let existing = lazy.store_if_none(Arc::clone(&loser));
    assert!(Arc::ptr_eq(&existing, &first));
    assert_eq!(Arc::strong_count(&loser), 1);
    // `first`, `published`, `existing` and the one held by `lazy`.
    assert_eq!(Arc::strong_count(&first), 4);

    drop(published);
    drop(existing);
    drop(lazy);
    assert_eq!(Arc::strong_count(&first), 1);
}

#[test]
fn debug_shows_published_state() {
    let lazy: AtomicLazyReference<u8> = AtomicLazyReference::default();
    assert_eq!(format!("{lazy:?}"), "AtomicLazyReference(None)");
    let _ = lazy.store_if_none(Arc::new(5));
    assert_eq!(format!("{lazy:?}"), "AtomicLazyReference(Some(5))");
}
