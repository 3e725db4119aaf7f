//! A write-once, atomically published shared reference.

use core::{fmt, marker::PhantomData};
use std::sync::Arc;

use super::Atomic;
use crate::{
    handle::Handle,
    ordering::{LoadOrdering, UpdateOrdering},
};

/// A reference that starts empty and is published at most once.
///
/// Concurrent initializers race through [`store_if_none`](Self::store_if_none);
/// exactly one candidate wins and every caller gets the winner back. The
/// published value is held by one strong count owned by the reference and
/// released on drop.
pub struct AtomicLazyReference<T> {
    cell: Atomic<Option<Handle<T>>>,
    _owns: PhantomData<Arc<T>>,
}

impl<T> AtomicLazyReference<T> {
    /// Creates an empty reference.
    pub fn new() -> Self {
        Self {
            cell: Atomic::new(None),
            _owns: PhantomData,
        }
    }

    /// Returns the published value, if any.
    pub fn load(&self) -> Option<Arc<T>> {
        self.cell
            .load(LoadOrdering::Acquire)
            // SAFETY: a published handle stays alive until `self` is dropped.
            .map(|handle| unsafe { handle.clone_arc() })
    }

    /// Publishes `value` unless a value is already published, and returns
    /// whichever value ends up published.
    pub fn store_if_none(&self, value: Arc<T>) -> Arc<T> {
        let candidate = Handle::from_arc(value);
        match self.cell.compare_exchange(
            None,
            Some(candidate),
            UpdateOrdering::AcquireRelease,
            LoadOrdering::Acquire,
        ) {
            // SAFETY: the candidate's strong count now belongs to `self`.
            Ok(_) => unsafe { candidate.clone_arc() },
            Err(Some(existing)) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("lazy reference already published; discarding candidate");
                // SAFETY: the candidate was never published, so its count is ours.
                drop(unsafe { candidate.into_arc() });
                // SAFETY: `existing` was published and lives as long as `self`.
                unsafe { existing.clone_arc() }
            }
            Err(None) => unreachable!("strong compare-exchange against `None` failed on `None`"),
        }
    }
}

impl<T> Default for AtomicLazyReference<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for AtomicLazyReference<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.cell.get() {
            // SAFETY: the published handle carries the count owned by `self`.
            drop(unsafe { handle.into_arc() });
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AtomicLazyReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AtomicLazyReference").field(&self.load()).finish()
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    #[test]
    fn first_store_wins() {
        let lazy = AtomicLazyReference::new();
        assert!(lazy.load().is_none());

        let first = lazy.store_if_none(Arc::new(1));
        let second = lazy.store_if_none(Arc::new(2));
        assert_eq!(*first, 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(lazy.load().as_deref(), Some(&1));
    }

    #[test]
    fn drop_releases_published_value() {
        let value = Arc::new(String::from("once"));
        {
            let lazy = AtomicLazyReference::new();
            let _ = lazy.store_if_none(Arc::clone(&value));
            assert_eq!(Arc::strong_count(&value), 2);
        }
        assert_eq!(Arc::strong_count(&value), 1);
    }
}
