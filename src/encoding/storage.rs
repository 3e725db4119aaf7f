use core::sync::atomic::Ordering;

use super::private::Sealed;
use crate::primitive::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicPtr, AtomicU16,
    AtomicU32, AtomicU64, AtomicU8, AtomicUsize,
};

/// A native atomic cell: the storage side of the encoding layer.
///
/// Sealed; implemented for the platform atomic types only. Its size and
/// alignment are those of the hardware atomic unit for its width.
pub trait AtomicStorage: Sealed + Send + Sync + Sized {
    /// The raw bit pattern the cell holds.
    type Bits: Copy + Eq;

    /// Whether operations on this cell compile to native lock-free
    /// instructions on the current target.
    const LOCK_FREE: bool;

    #[doc(hidden)]
    fn with_bits(bits: Self::Bits) -> Self;

    #[doc(hidden)]
    fn load(&self, order: Ordering) -> Self::Bits;

    #[doc(hidden)]
    fn store(&self, bits: Self::Bits, order: Ordering);

    #[doc(hidden)]
    fn swap(&self, bits: Self::Bits, order: Ordering) -> Self::Bits;

    #[doc(hidden)]
    fn compare_exchange(
        &self,
        current: Self::Bits,
        new: Self::Bits,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Bits, Self::Bits>;

    #[doc(hidden)]
    fn compare_exchange_weak(
        &self,
        current: Self::Bits,
        new: Self::Bits,
        success: Ordering,
        failure: Ordering,
    ) -> Result<Self::Bits, Self::Bits>;
}

macro_rules! impl_storage {
    ($($cell:ty => $bits:ty, $width:tt;)+) => {$(
        impl Sealed for $cell {}

        impl AtomicStorage for $cell {
            type Bits = $bits;

            const LOCK_FREE: bool = cfg!(target_has_atomic = $width);

            #[inline(always)]
            fn with_bits(bits: $bits) -> Self {
                <$cell>::new(bits)
            }

            #[inline(always)]
            fn load(&self, order: Ordering) -> $bits {
                <$cell>::load(self, order)
            }

            #[inline(always)]
            fn store(&self, bits: $bits, order: Ordering) {
                <$cell>::store(self, bits, order);
            }

            #[inline(always)]
            fn swap(&self, bits: $bits, order: Ordering) -> $bits {
                <$cell>::swap(self, bits, order)
            }

            #[inline(always)]
            fn compare_exchange(
                &self,
                current: $bits,
                new: $bits,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$bits, $bits> {
                <$cell>::compare_exchange(self, current, new, success, failure)
            }

            #[inline(always)]
            fn compare_exchange_weak(
                &self,
                current: $bits,
                new: $bits,
                success: Ordering,
                failure: Ordering,
            ) -> Result<$bits, $bits> {
                <$cell>::compare_exchange_weak(self, current, new, success, failure)
            }
        }
    )+};
}

impl_storage! {
    AtomicBool => bool, "8";
    AtomicI8 => i8, "8";
    AtomicU8 => u8, "8";
    AtomicI16 => i16, "16";
    AtomicU16 => u16, "16";
    AtomicI32 => i32, "32";
    AtomicU32 => u32, "32";
    AtomicI64 => i64, "64";
    AtomicU64 => u64, "64";
    AtomicIsize => isize, "ptr";
    AtomicUsize => usize, "ptr";
    AtomicPtr<()> => *mut (), "ptr";
}
