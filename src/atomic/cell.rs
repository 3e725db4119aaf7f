use core::{fmt, marker::PhantomData, sync::atomic::Ordering};

use crossbeam_utils::Backoff;

use crate::{
    encoding::{AtomicStorage, AtomicValue},
    ordering::{LoadOrdering, StoreOrdering, UpdateOrdering},
    primitive,
};

/// An atomic cell holding one `T`.
///
/// The cell is exactly its native storage (`repr(transparent)`), so
/// `Atomic<u32>` has the size and alignment of `AtomicU32`, and every pointer
/// variant has the size and alignment of `AtomicPtr`.
///
/// All shared access goes through `&self` methods, each a single atomic
/// machine operation carrying the ordering it was given. The cell is neither
/// `Copy` nor `Clone`; [`get`](Self::get) and [`into_inner`](Self::into_inner)
/// read it non-atomically only when exclusive access proves nobody else can.
#[repr(transparent)]
pub struct Atomic<T: AtomicValue> {
    cell: T::Storage,
    _value: PhantomData<T>,
}

impl<T: AtomicValue> Atomic<T> {
    /// Creates a new cell holding `value`.
    #[inline(always)]
    pub fn new(value: T) -> Self {
        Self {
            cell: <T::Storage as AtomicStorage>::with_bits(value.encode()),
            _value: PhantomData,
        }
    }

    /// Consumes the cell and returns its value.
    #[inline]
    pub fn into_inner(self) -> T {
        T::decode(self.cell.load(Ordering::Relaxed))
    }

    /// Reads the value through an exclusive borrow.
    #[inline]
    pub fn get(&mut self) -> T {
        T::decode(self.cell.load(Ordering::Relaxed))
    }

    /// Replaces the value through an exclusive borrow.
    #[inline]
    pub fn set(&mut self, value: T) {
        self.cell.store(value.encode(), Ordering::Relaxed);
    }

    #[inline(always)]
    pub(crate) fn storage(&self) -> &T::Storage {
        &self.cell
    }

    /// Returns `true` if operations on this cell are lock-free on the current
    /// target.
    #[inline(always)]
    pub fn is_lock_free(&self) -> bool {
        <T::Storage as AtomicStorage>::LOCK_FREE
    }

    /// Loads the current value.
    #[inline(always)]
    pub fn load(&self, order: LoadOrdering) -> T {
        T::decode(self.cell.load(order.to_core()))
    }

    /// Stores a new value.
    #[inline(always)]
    pub fn store(&self, value: T, order: StoreOrdering) {
        self.cell.store(value.encode(), order.to_core());
    }

    /// Stores a new value, returning the previous value.
    #[inline(always)]
    pub fn exchange(&self, value: T, order: UpdateOrdering) -> T {
        T::decode(self.cell.swap(value.encode(), order.to_core()))
    }

    /// Stores `new` if the current value equals `current`.
    ///
    /// Returns `Ok(previous)` on success and `Err(actual)` otherwise. Never
    /// fails spuriously: an `Err` means the cell held a different value at the
    /// moment of the attempt.
    #[inline(always)]
    pub fn compare_exchange(
        &self,
        current: T,
        new: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<T, T> {
        self.cell
            .compare_exchange(current.encode(), new.encode(), success.to_core(), failure.to_core())
            .map(T::decode)
            .map_err(T::decode)
    }

    /// Stores `new` if the current value equals `current` (weak version).
    ///
    /// May fail even when the values compare equal. This is a single attempt;
    /// callers retry in a loop until it succeeds or reports a value they do not
    /// want to overwrite.
    #[inline(always)]
    pub fn compare_exchange_weak(
        &self,
        current: T,
        new: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<T, T> {
        self.cell
            .compare_exchange_weak(current.encode(), new.encode(), success.to_core(), failure.to_core())
            .map(T::decode)
            .map_err(T::decode)
    }

    /// Compare-exchange against `*expected`, updating it on failure.
    ///
    /// If the cell holds `*expected`, replaces it with `desired` and returns
    /// `true`; `*expected` is left unchanged. Otherwise writes the cell's
    /// actual value into `*expected` and returns `false`.
    #[inline]
    pub fn compare_exchange_in_place(
        &self,
        expected: &mut T,
        desired: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> bool {
        match self.compare_exchange(*expected, desired, success, failure) {
            Ok(_) => true,
            Err(actual) => {
                *expected = actual;
                false
            }
        }
    }

    /// Weak form of [`compare_exchange_in_place`](Self::compare_exchange_in_place).
    ///
    /// After a spurious failure `*expected` is rewritten with the value it
    /// already had, so a retry loop can simply call this again.
    #[inline]
    pub fn compare_exchange_weak_in_place(
        &self,
        expected: &mut T,
        desired: T,
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> bool {
        match self.compare_exchange_weak(*expected, desired, success, failure) {
            Ok(_) => true,
            Err(actual) => {
                *expected = actual;
                false
            }
        }
    }

    /// Strong compare-exchange with the failure ordering derived from
    /// `ordering` (see [`UpdateOrdering::failure_ordering`]).
    #[inline(always)]
    pub fn compare_exchange_with(&self, current: T, new: T, ordering: UpdateOrdering) -> Result<T, T> {
        self.compare_exchange(current, new, ordering, ordering.failure_ordering())
    }

    /// Weak compare-exchange with the failure ordering derived from `ordering`.
    #[inline(always)]
    pub fn compare_exchange_weak_with(&self, current: T, new: T, ordering: UpdateOrdering) -> Result<T, T> {
        self.compare_exchange_weak(current, new, ordering, ordering.failure_ordering())
    }

    /// Repeatedly applies `f` to the current value until the update lands.
    ///
    /// This is a retry loop around [`compare_exchange_weak`](Self::compare_exchange_weak),
    /// backing off between attempts; it can spin under contention. `f` may run
    /// several times. Returns `Ok(previous)` once a value produced by `f` has
    /// been stored, or `Err(current)` as soon as `f` returns `None`.
    pub fn fetch_update<F>(&self, set: UpdateOrdering, fetch: LoadOrdering, mut f: F) -> Result<T, T>
    where
        F: FnMut(T) -> Option<T>,
    {
        let backoff = Backoff::new();
        let mut prev = self.load(fetch);
        while let Some(next) = f(prev) {
            match self.compare_exchange_weak(prev, next, set, fetch) {
                Ok(previous) => return Ok(previous),
                Err(actual) => {
                    prev = actual;
                    primitive::backoff(&backoff);
                }
            }
        }
        Err(prev)
    }
}

impl<T: AtomicValue + Default> Default for Atomic<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for Atomic<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.load(LoadOrdering::Relaxed), f)
    }
}

// SAFETY: the storage is a native atomic, which is Send + Sync for every
// payload; `T` is only a marker for how its bits are decoded.
unsafe impl<T: AtomicValue> Send for Atomic<T> {}
unsafe impl<T: AtomicValue> Sync for Atomic<T> {}
