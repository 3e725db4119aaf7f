use core::sync::atomic::Ordering;

use super::{private::Sealed, AtomicBitwise, AtomicInteger, AtomicValue};
use crate::primitive::{
    AtomicBool, AtomicI16, AtomicI32, AtomicI64, AtomicI8, AtomicIsize, AtomicU16, AtomicU32,
    AtomicU64, AtomicU8, AtomicUsize,
};

/// Identity encoding plus the bitwise operations, shared by integers and `bool`.
macro_rules! impl_identity {
    ($($value:ty => $cell:ty;)+) => {$(
        impl Sealed for $value {}

        // SAFETY: identity encoding; every bit pattern is a valid value.
        unsafe impl AtomicValue for $value {
            type Storage = $cell;

            #[inline(always)]
            fn encode(self) -> $value {
                self
            }

            #[inline(always)]
            fn decode(bits: $value) -> Self {
                bits
            }
        }

        impl AtomicBitwise for $value {
            #[inline(always)]
            fn fetch_and(cell: &$cell, value: $value, order: Ordering) -> $value {
                cell.fetch_and(value, order)
            }

            #[inline(always)]
            fn fetch_or(cell: &$cell, value: $value, order: Ordering) -> $value {
                cell.fetch_or(value, order)
            }

            #[inline(always)]
            fn fetch_xor(cell: &$cell, value: $value, order: Ordering) -> $value {
                cell.fetch_xor(value, order)
            }
        }
    )+};
}

macro_rules! impl_integer {
    ($($value:ty => $cell:ty;)+) => {$(
        impl_identity! { $value => $cell; }

        impl AtomicInteger for $value {
            // The native fetch_add/fetch_sub wrap on overflow.
            #[inline(always)]
            fn fetch_add(cell: &$cell, value: $value, order: Ordering) -> $value {
                cell.fetch_add(value, order)
            }

            #[inline(always)]
            fn fetch_sub(cell: &$cell, value: $value, order: Ordering) -> $value {
                cell.fetch_sub(value, order)
            }
        }
    )+};
}

impl_identity! {
    bool => AtomicBool;
}

impl_integer! {
    i8 => AtomicI8;
    u8 => AtomicU8;
    i16 => AtomicI16;
    u16 => AtomicU16;
    i32 => AtomicI32;
    u32 => AtomicU32;
    i64 => AtomicI64;
    u64 => AtomicU64;
    isize => AtomicIsize;
    usize => AtomicUsize;
}
