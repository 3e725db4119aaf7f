use std::ptr::NonNull;
use std::thread;

use typed_atomics::{AtomicPair, LoadOrdering, StoreOrdering, UpdateOrdering};

#[test]
fn pair_operations_act_on_both_halves() {
    let pair = AtomicPair::new((1usize, 2usize));
    assert_eq!(pair.load(LoadOrdering::Acquire), (1, 2));

    pair.store((3, 4), StoreOrdering::Release);
    assert_eq!(pair.exchange((5, 6), UpdateOrdering::AcquireRelease), (3, 4));

    // A half match is still a mismatch.
    assert_eq!(
        pair.compare_exchange((5, 0), (7, 8), UpdateOrdering::AcquireRelease, LoadOrdering::Acquire),
        Err((5, 6))
    );
    assert_eq!(
        pair.compare_exchange((5, 6), (7, 8), UpdateOrdering::AcquireRelease, LoadOrdering::Acquire),
        Ok((5, 6))
    );

    let mut expected = (0, 0);
    assert!(!pair.compare_exchange_in_place(
        &mut expected,
        (9, 9),
        UpdateOrdering::SequentiallyConsistent,
        LoadOrdering::SequentiallyConsistent
    ));
    assert_eq!(expected, (7, 8));
    assert!(pair.compare_exchange_in_place(
        &mut expected,
        (9, 9),
        UpdateOrdering::SequentiallyConsistent,
        LoadOrdering::SequentiallyConsistent
    ));
    assert_eq!(pair.into_inner(), (9, 9));
}

#[test]
fn pointer_and_tag_pair() {
    let mut slots = [10u32, 20u32];
    let [a, b] = &mut slots;
    let (a, b) = (NonNull::from(a), NonNull::from(b));

    let head: AtomicPair<Option<NonNull<u32>>, usize> = AtomicPair::new((None, 0));
    assert_eq!(head.load(LoadOrdering::Relaxed), (None, 0));

    head.store((Some(a), 1), StoreOrdering::Release);
    assert_eq!(
        head.compare_exchange_weak((Some(a), 1), (Some(b), 2), UpdateOrdering::AcquireRelease, LoadOrdering::Acquire),
        Ok((Some(a), 1))
    );
    // Same pointer, stale tag.
    assert_eq!(
        head.compare_exchange((Some(b), 1), (None, 3), UpdateOrdering::AcquireRelease, LoadOrdering::Acquire),
        Err((Some(b), 2))
    );
}

#[test]
fn concurrent_tagged_increments_never_tear() {
    const THREADS: usize = 4;
    const ITERS: usize = 2_000;

    let pair = AtomicPair::new((0usize, 0usize));
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERS {
                    let mut seen = pair.load(LoadOrdering::Acquire);
                    loop {
                        assert_eq!(seen.0, seen.1, "observed a torn pair");
                        let next = (seen.0 + 1, seen.1 + 1);
                        if pair.compare_exchange_in_place(
                            &mut seen,
                            next,
                            UpdateOrdering::AcquireRelease,
                            LoadOrdering::Acquire,
                        ) {
                            break;
                        }
                    }
                }
            });
        }
    });
    assert_eq!(pair.into_inner(), (THREADS * ITERS, THREADS * ITERS));
}

#[test]
fn seq_cst_pairs_forbid_store_buffering() {
    const ROUNDS: usize = 2_000;

    for _ in 0..ROUNDS {
        let x = AtomicPair::new((0usize, 0usize));
        let y = AtomicPair::new((0usize, 0usize));
        let (seen_y, seen_x) = thread::scope(|s| {
            let a = s.spawn(|| {
                x.store((1, 1), StoreOrdering::SequentiallyConsistent);
                y.load(LoadOrdering::SequentiallyConsistent).0
            });
            let b = s.spawn(|| {
                y.store((1, 1), StoreOrdering::SequentiallyConsistent);
                x.load(LoadOrdering::SequentiallyConsistent).0
            });
            (a.join().unwrap(), b.join().unwrap())
        });
        // In a single total order at least one store precedes the other
        // thread's load.
        assert!(seen_y == 1 || seen_x == 1, "both threads read the initial pair");
    }
}

#[test]
fn debug_prints_both_values() {
    let pair = AtomicPair::new((true, -3i32));
    assert_eq!(format!("{pair:?}"), "AtomicPair(true, -3)");
}
