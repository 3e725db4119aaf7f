//! # `typed_atomics` - Typed Atomic Primitives
//!
//! A typed, ordering-aware layer over the hardware atomic operations for
//! fixed-width integers, raw addresses and opaque handles. Lock-free data
//! structures build on one uniform API instead of reaching for a different
//! intrinsic per width and pointer flavour.
//!
//! ## Safety Guarantees
//!
//! ### Ordering Safety
//! - **Illegal orderings are unrepresentable**: loads take a [`LoadOrdering`],
//!   stores a [`StoreOrdering`], read-modify-writes an [`UpdateOrdering`] and
//!   fences a [`FenceOrdering`]. A releasing load or an acquiring store does
//!   not type-check.
//! - **Exact mapping**: every ordering maps to exactly one native ordering.
//!   Nothing is silently downgraded.
//!
//! ### Value Safety
//! - **Round-trip encoding**: every [`AtomicValue`] satisfies
//!   `decode(encode(v)) == v`.
//! - **Distinct nullability**: `NonNull<T>` and `Handle<T>` cells can never
//!   hold the null address; `Option<NonNull<T>>` and `Option<Handle<T>>` use
//!   it for `None`.
//! - **No torn values**: a cell is never `Copy`/`Clone`; shared access is
//!   atomic-only, and plain reads require `&mut` or ownership.
//!
//! ## Architecture
//!
//! 1. **Encoding layer** ([`encoding`]): maps each value type onto a native
//!    atomic storage cell and back.
//! 2. **Operation set** ([`atomic`]): [`Atomic<T>`] implements load, store,
//!    exchange, fetch-and-modify and compare-exchange once over the encoding
//!    layer, plus the standalone [`fence`].
//! 3. **Extensions**: [`AtomicPair`] for double-width pairs,
//!    [`AtomicLazyReference`] for write-once publication and [`atomic_repr!`]
//!    for user types.
//!
//! ## Supported Values
//!
//! | kind | types |
//! |---|---|
//! | integers | `i8 u8 i16 u16 i32 u32 i64 u64 isize usize` |
//! | flags | `bool` |
//! | non-null addresses | `NonNull<T>`, [`Handle<T>`] |
//! | nullable addresses | `*const T`, `*mut T`, `Option<NonNull<T>>`, `Option<Handle<T>>` |
//!
//! ## Example
//!
//! ```rust
//! use typed_atomics::{Atomic, LoadOrdering, UpdateOrdering};
//! use std::thread;
//!
//! let hits = Atomic::new(0u64);
//! thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             for _ in 0..1000 {
//!                 hits.fetch_add(1, UpdateOrdering::Relaxed);
//!             }
//!         });
//!     }
//! });
//! assert_eq!(hits.load(LoadOrdering::Relaxed), 4000);
//!
//! // Compare-exchange reports the actual value on failure.
//! let mut expected = 7;
//! assert!(!hits.compare_exchange_in_place(
//!     &mut expected,
//!     0,
//!     UpdateOrdering::AcquireRelease,
//!     LoadOrdering::Acquire,
//! ));
//! assert_eq!(expected, 4000);
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::inline_always)]

mod macros;

pub mod atomic;
pub mod encoding;
pub mod error;
pub mod handle;
pub mod ordering;

mod primitive;

pub use atomic::{fence, Atomic, AtomicLazyReference, AtomicPair, PairElement};
pub use encoding::{AtomicBitwise, AtomicInteger, AtomicStorage, AtomicValue, Bits, NonNullValue};
pub use error::{OperationKind, OrderingError};
pub use handle::Handle;
pub use ordering::{FenceOrdering, LoadOrdering, MemoryOrdering, StoreOrdering, UpdateOrdering};

// Compile-time assertions for the cell layout: a cell is exactly its native
// atomic unit. Loom's model atomics carry bookkeeping, so only check the real
// backend.
#[cfg(not(loom))]
const _: () = {
    use core::{mem, ptr::NonNull};

    assert!(mem::size_of::<Atomic<u8>>() == 1);
    assert!(mem::size_of::<Atomic<i16>>() == 2);
    assert!(mem::size_of::<Atomic<u32>>() == 4);
    assert!(mem::size_of::<Atomic<i64>>() == 8);
    assert!(mem::align_of::<Atomic<i64>>() == 8);
    assert!(mem::size_of::<Atomic<bool>>() == 1);
    assert!(mem::size_of::<Atomic<usize>>() == mem::size_of::<usize>());

    // Every address-shaped cell is one pointer wide, nullable or not.
    assert!(mem::size_of::<Atomic<NonNull<u64>>>() == mem::size_of::<*mut ()>());
    assert!(mem::size_of::<Atomic<Option<NonNull<u64>>>>() == mem::size_of::<*mut ()>());
    assert!(mem::size_of::<Atomic<Option<Handle<String>>>>() == mem::size_of::<*mut ()>());
    assert!(mem::align_of::<Atomic<*const u8>>() == mem::align_of::<*mut ()>());

    // A handle is a bare address.
    assert!(mem::size_of::<Handle<String>>() == mem::size_of::<usize>());
};
