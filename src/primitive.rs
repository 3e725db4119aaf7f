//! Backend atomics.
//!
//! Production builds use `core`'s atomics. Building with `--cfg loom` swaps
//! in `loom`'s model-checked equivalents so the same cell code can be run
//! under the loom scheduler (see `tests/loom_model.rs`).

#[cfg(not(loom))]
pub(crate) use core::sync::atomic::{
    fence, AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicPtr,
    AtomicU16, AtomicU32, AtomicU64, AtomicU8, AtomicUsize,
};

#[cfg(loom)]
pub(crate) use loom::sync::atomic::{
    fence, AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicPtr,
    AtomicU16, AtomicU32, AtomicU64, AtomicU8, AtomicUsize,
};

/// Back off inside a retry loop.
#[cfg(not(loom))]
#[inline]
pub(crate) fn backoff(backoff: &crossbeam_utils::Backoff) {
    backoff.spin();
}

/// Back off inside a retry loop. Under loom a spin must yield to the model
/// scheduler, otherwise the loop never observes the other thread.
#[cfg(loom)]
#[inline]
pub(crate) fn backoff(_backoff: &crossbeam_utils::Backoff) {
    loom::thread::yield_now();
}
