//! The encoding layer: how a semantic value lives inside an atomic cell.
//!
//! Every value type `T` names a [`Storage`](AtomicValue::Storage) cell (one of
//! the native atomic types) and a pair of pure functions:
//!
//! - `encode(T) -> Bits<T>`, the bit pattern written into the cell;
//! - `decode(Bits<T>) -> T`, its inverse.
//!
//! Integers encode as their own two's-complement bits. Address-shaped values
//! encode as the address, carried as `*mut ()` so provenance survives the
//! round trip. The null address is reserved for the "absent" state of nullable
//! types and never produced by a non-null type.
//!
//! The operation set in [`crate::atomic`] is written once against these traits.

mod integer;
mod pointer;
mod storage;

pub use storage::AtomicStorage;

use core::sync::atomic::Ordering;

use crate::primitive::AtomicPtr;

/// The raw bit pattern stored for `T`.
pub type Bits<T> = <<T as AtomicValue>::Storage as AtomicStorage>::Bits;

/// A value that can be stored in an [`Atomic`](crate::Atomic) cell.
///
/// # Safety
///
/// Implementors guarantee:
/// - `decode(encode(v)) == v` for every value `v` (round-trip law);
/// - `decode` is total over every pattern `encode` can produce, so bits read
///   back from a cell holding only encoded values always decode;
/// - equal values encode to equal bit patterns, so compare-exchange on the
///   bits agrees with equality on the values.
pub unsafe trait AtomicValue: Copy {
    /// The native atomic cell holding the encoded bits.
    type Storage: AtomicStorage;

    /// Encodes `self` into the cell's bit pattern.
    fn encode(self) -> Bits<Self>;

    /// Decodes a bit pattern previously produced by [`encode`](Self::encode).
    fn decode(bits: Bits<Self>) -> Self;
}

/// An address-shaped value whose encoding is never the null address.
///
/// `Option<T>` is atomic for every such `T`, using null for `None`.
///
/// # Safety
///
/// `T::encode` must never return a null pointer.
pub unsafe trait NonNullValue: AtomicValue<Storage = AtomicPtr<()>> {}

/// Integer values: wrapping arithmetic plus the bitwise operations.
///
/// Sealed; implemented for `i8`..`i64`, `u8`..`u64`, `isize` and `usize`.
pub trait AtomicInteger: AtomicBitwise + num_traits::PrimInt + private::Sealed {
    #[doc(hidden)]
    fn fetch_add(cell: &Self::Storage, value: Self, order: Ordering) -> Self;

    #[doc(hidden)]
    fn fetch_sub(cell: &Self::Storage, value: Self, order: Ordering) -> Self;
}

/// Values supporting atomic bitwise AND, OR and XOR.
///
/// Sealed; implemented for the integers and `bool`.
pub trait AtomicBitwise: AtomicValue + private::Sealed {
    #[doc(hidden)]
    fn fetch_and(cell: &Self::Storage, value: Self, order: Ordering) -> Self;

    #[doc(hidden)]
    fn fetch_or(cell: &Self::Storage, value: Self, order: Ordering) -> Self;

    #[doc(hidden)]
    fn fetch_xor(cell: &Self::Storage, value: Self, order: Ordering) -> Self;
}

mod private {
    pub trait Sealed {}
}
