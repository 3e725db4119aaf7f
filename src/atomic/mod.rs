//! The atomic operation set.
//!
//! [`Atomic<T>`] implements load, store, exchange and compare-exchange once for
//! every [`AtomicValue`](crate::AtomicValue); fetch-and-modify operations are
//! added for integers (arithmetic and bitwise) and `bool` (bitwise). Each call
//! is a single bounded atomic step with exactly the ordering it was given.
//!
//! Important:
//! - Weak compare-exchange may fail spuriously and never loops on its own.
//!   Retry loops belong to the caller, or to [`Atomic::fetch_update`], which
//!   is an explicit loop with backoff.
//! - Operations on two different cells are not ordered with respect to each
//!   other unless the caller adds orderings or a [`fence`].

/// The generic cell.
mod cell;
/// Standalone fences.
mod fence;
/// Fetch-and-modify operations.
mod integer;
/// Write-once shared references.
pub mod lazy;
/// Double-width pairs.
pub mod pair;

pub use cell::Atomic;
pub use fence::fence;
pub use lazy::AtomicLazyReference;
pub use pair::{AtomicPair, PairElement};
