//! Memory orderings, split by the kind of operation they may be attached to.
//!
//! `core::sync::atomic::Ordering` panics at runtime when given an ordering the
//! operation cannot honour (a `Release` load, an `Acquire` store, a `Relaxed`
//! fence). Here every operation kind takes its own ordering type, so an illegal
//! ordering is a type error instead:
//!
//! | type             | relaxed | acquire | release | acqRel | seqCst |
//! |------------------|:-------:|:-------:|:-------:|:------:|:------:|
//! | [`LoadOrdering`]   | ✓ | ✓ |   |   | ✓ |
//! | [`StoreOrdering`]  | ✓ |   | ✓ |   | ✓ |
//! | [`UpdateOrdering`] | ✓ | ✓ | ✓ | ✓ | ✓ |
//! | [`FenceOrdering`]  |   | ✓ | ✓ | ✓ | ✓ |
//!
//! [`MemoryOrdering`] is the closed enumeration of all five; it converts
//! fallibly into each restricted type.

use core::{fmt, str::FromStr, sync::atomic::Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{OperationKind, OrderingError};

/// The full, closed set of memory orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemoryOrdering {
    /// No ordering constraint; only atomicity.
    Relaxed,
    /// Later accesses may not be reordered before this one.
    Acquire,
    /// Earlier accesses may not be reordered after this one.
    Release,
    /// Both [`Acquire`](Self::Acquire) and [`Release`](Self::Release).
    AcquireRelease,
    /// Acquire-release plus a single total order over all such operations.
    SequentiallyConsistent,
}

impl MemoryOrdering {
    /// All orderings, weakest first.
    pub const ALL: [MemoryOrdering; 5] = [
        MemoryOrdering::Relaxed,
        MemoryOrdering::Acquire,
        MemoryOrdering::Release,
        MemoryOrdering::AcquireRelease,
        MemoryOrdering::SequentiallyConsistent,
    ];

    /// The canonical textual name (`relaxed`, `acquireRelease`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            MemoryOrdering::Relaxed => "relaxed",
            MemoryOrdering::Acquire => "acquire",
            MemoryOrdering::Release => "release",
            MemoryOrdering::AcquireRelease => "acquireRelease",
            MemoryOrdering::SequentiallyConsistent => "sequentiallyConsistent",
        }
    }

    /// The matching `core` ordering. The mapping is exact.
    #[inline(always)]
    pub const fn to_core(self) -> Ordering {
        match self {
            MemoryOrdering::Relaxed => Ordering::Relaxed,
            MemoryOrdering::Acquire => Ordering::Acquire,
            MemoryOrdering::Release => Ordering::Release,
            MemoryOrdering::AcquireRelease => Ordering::AcqRel,
            MemoryOrdering::SequentiallyConsistent => Ordering::SeqCst,
        }
    }
}

impl fmt::Display for MemoryOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MemoryOrdering {
    type Err = OrderingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MemoryOrdering::ALL
            .into_iter()
            .find(|o| o.name() == s)
            .ok_or_else(|| OrderingError::Unknown(s.to_owned()))
    }
}

/// Generates a restricted ordering type: the enum, its exact `core` mapping,
/// the infallible widening into `MemoryOrdering`, and the checked narrowing
/// back out of it.
macro_rules! restricted_ordering {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:expr, {
            $( $(#[$vmeta:meta])* $variant:ident => $core:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "MemoryOrdering", into = "MemoryOrdering")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// The matching `core` ordering.
            #[inline(always)]
            pub const fn to_core(self) -> Ordering {
                match self {
                    $( $name::$variant => Ordering::$core, )+
                }
            }
        }

        impl From<$name> for MemoryOrdering {
            #[inline(always)]
            fn from(o: $name) -> Self {
                match o {
                    $( $name::$variant => MemoryOrdering::$variant, )+
                }
            }
        }

        impl TryFrom<MemoryOrdering> for $name {
            type Error = OrderingError;

            fn try_from(o: MemoryOrdering) -> Result<Self, Self::Error> {
                match o {
                    $( MemoryOrdering::$variant => Ok($name::$variant), )+
                    #[allow(unreachable_patterns)]
                    other => Err(OrderingError::Illegal {
                        ordering: other,
                        operation: $kind,
                    }),
                }
            }
        }

        impl FromStr for $name {
            type Err = OrderingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<MemoryOrdering>()?.try_into()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&MemoryOrdering::from(*self), f)
            }
        }
    };
}

restricted_ordering! {
    /// Orderings legal for a pure atomic read.
    LoadOrdering, OperationKind::Load, {
        /// Relaxed load.
        Relaxed => Relaxed,
        /// Acquiring load; pairs with a releasing store.
        Acquire => Acquire,
        /// Sequentially consistent load.
        SequentiallyConsistent => SeqCst,
    }
}

restricted_ordering! {
    /// Orderings legal for a pure atomic write.
    StoreOrdering, OperationKind::Store, {
        /// Relaxed store.
        Relaxed => Relaxed,
        /// Releasing store; pairs with an acquiring load.
        Release => Release,
        /// Sequentially consistent store.
        SequentiallyConsistent => SeqCst,
    }
}

restricted_ordering! {
    /// Orderings legal for a read-modify-write (exchange, fetch ops, CAS success).
    UpdateOrdering, OperationKind::Update, {
        /// Relaxed update.
        Relaxed => Relaxed,
        /// The read half acquires.
        Acquire => Acquire,
        /// The write half releases.
        Release => Release,
        /// The read half acquires and the write half releases.
        AcquireRelease => AcqRel,
        /// Sequentially consistent update.
        SequentiallyConsistent => SeqCst,
    }
}

restricted_ordering! {
    /// Orderings legal for a standalone fence.
    FenceOrdering, OperationKind::Fence, {
        /// Acquire fence.
        Acquire => Acquire,
        /// Release fence.
        Release => Release,
        /// Acquire-release fence.
        AcquireRelease => AcqRel,
        /// Sequentially consistent fence.
        SequentiallyConsistent => SeqCst,
    }
}

impl UpdateOrdering {
    /// The strongest load ordering usable on the failure path of a
    /// compare-exchange that succeeds with `self`.
    ///
    /// A failed compare-exchange performs no write, so any release half is
    /// dropped: `release -> relaxed`, `acquireRelease -> acquire`.
    #[inline(always)]
    pub const fn failure_ordering(self) -> LoadOrdering {
        match self {
            UpdateOrdering::Relaxed | UpdateOrdering::Release => LoadOrdering::Relaxed,
            UpdateOrdering::Acquire | UpdateOrdering::AcquireRelease => LoadOrdering::Acquire,
            UpdateOrdering::SequentiallyConsistent => LoadOrdering::SequentiallyConsistent,
        }
    }
}

impl Default for LoadOrdering {
    fn default() -> Self {
        LoadOrdering::SequentiallyConsistent
    }
}

impl Default for StoreOrdering {
    fn default() -> Self {
        StoreOrdering::SequentiallyConsistent
    }
}

impl Default for UpdateOrdering {
    fn default() -> Self {
        UpdateOrdering::SequentiallyConsistent
    }
}

impl Default for FenceOrdering {
    fn default() -> Self {
        FenceOrdering::SequentiallyConsistent
    }
}
