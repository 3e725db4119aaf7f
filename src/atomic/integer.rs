//! Fetch-and-modify operations for integer and `bool` cells.

use super::Atomic;
use crate::{
    encoding::{AtomicBitwise, AtomicInteger},
    ordering::UpdateOrdering,
};

impl<T: AtomicBitwise> Atomic<T> {
    /// Bitwise AND with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_and(&self, value: T, order: UpdateOrdering) -> T {
        T::fetch_and(self.storage(), value, order.to_core())
    }

    /// Bitwise OR with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_or(&self, value: T, order: UpdateOrdering) -> T {
        T::fetch_or(self.storage(), value, order.to_core())
    }

    /// Bitwise XOR with the current value, returning the previous value.
    #[inline(always)]
    pub fn fetch_xor(&self, value: T, order: UpdateOrdering) -> T {
        T::fetch_xor(self.storage(), value, order.to_core())
    }
}

impl<T: AtomicInteger> Atomic<T> {
    /// Adds to the current value, returning the previous value.
    ///
    /// Overflow wraps around.
    #[inline(always)]
    pub fn fetch_add(&self, value: T, order: UpdateOrdering) -> T {
        <T as AtomicInteger>::fetch_add(self.storage(), value, order.to_core())
    }

    /// Subtracts from the current value, returning the previous value.
    ///
    /// Overflow wraps around.
    #[inline(always)]
    pub fn fetch_sub(&self, value: T, order: UpdateOrdering) -> T {
        <T as AtomicInteger>::fetch_sub(self.storage(), value, order.to_core())
    }

    /// Adds one, returning the previous value.
    #[inline(always)]
    pub fn fetch_increment(&self, order: UpdateOrdering) -> T {
        self.fetch_add(T::one(), order)
    }

    /// Subtracts one, returning the previous value.
    #[inline(always)]
    pub fn fetch_decrement(&self, order: UpdateOrdering) -> T {
        self.fetch_sub(T::one(), order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::LoadOrdering;

    #[test]
    fn unsigned_add_wraps() {
        let cell = Atomic::new(250u8);
        assert_eq!(cell.fetch_add(10, UpdateOrdering::Relaxed), 250);
        assert_eq!(cell.load(LoadOrdering::Relaxed), 4);
    }

    #[test]
    fn signed_sub_wraps() {
        let cell = Atomic::new(i32::MIN);
        assert_eq!(cell.fetch_decrement(UpdateOrdering::Relaxed), i32::MIN);
        assert_eq!(cell.load(LoadOrdering::Relaxed), i32::MAX);
        assert_eq!(cell.fetch_increment(UpdateOrdering::Relaxed), i32::MAX);
        assert_eq!(cell.load(LoadOrdering::Relaxed), i32::MIN);
    }

    #[test]
    fn bool_bitwise() {
        let flag = Atomic::new(false);
        assert!(!flag.fetch_or(true, UpdateOrdering::AcquireRelease));
        assert!(flag.fetch_and(false, UpdateOrdering::AcquireRelease));
        assert!(!flag.fetch_xor(true, UpdateOrdering::AcquireRelease));
        assert!(flag.load(LoadOrdering::Acquire));
    }
}
