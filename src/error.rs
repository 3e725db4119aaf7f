//! Errors for the only fallible surface of the crate: turning text or a
//! [`MemoryOrdering`] into an ordering legal for a given operation kind.
//!
//! Atomic operations themselves never return errors. A failed
//! compare-exchange is an ordinary outcome, not an error.

use core::fmt;

use crate::ordering::MemoryOrdering;

/// The kind of atomic operation an ordering is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// A pure read.
    Load,
    /// A pure write.
    Store,
    /// A read-modify-write.
    Update,
    /// A standalone fence.
    Fence,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OperationKind::Load => "load",
            OperationKind::Store => "store",
            OperationKind::Update => "update",
            OperationKind::Fence => "fence",
        })
    }
}

/// Error produced when parsing or narrowing a memory ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderingError {
    /// The text does not name any memory ordering.
    Unknown(String),
    /// The ordering exists but is not legal for `operation`.
    Illegal {
        /// The rejected ordering.
        ordering: MemoryOrdering,
        /// The operation kind it was offered to.
        operation: OperationKind,
    },
}

impl fmt::Display for OrderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingError::Unknown(name) => write!(f, "unknown memory ordering `{name}`"),
            OrderingError::Illegal { ordering, operation } => {
                write!(f, "`{ordering}` is not a legal {operation} ordering")
            }
        }
    }
}

impl std::error::Error for OrderingError {}
