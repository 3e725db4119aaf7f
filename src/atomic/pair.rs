//! Double-width atomic pairs.
//!
//! Two word-sized elements share one 2-word cell and are loaded, stored,
//! exchanged and compared together. Stable Rust has no portable double-width
//! atomic, so the cell is a `crossbeam_utils::atomic::AtomicCell`: native where
//! crossbeam can use a native instruction, otherwise a lock-striped sequence
//! lock. [`AtomicPair::is_lock_free`] reports which one is in use.
//!
//! The cell itself gives acquire loads, release stores and acquire-release
//! read-modify-writes, so `Relaxed`, `Acquire`, `Release` and
//! `AcquireRelease` are honoured as asked or stronger. A
//! `SequentiallyConsistent` request (on either side of a compare-exchange)
//! brackets the cell operation with sequentially consistent fences, which
//! places it in the single total order.

use core::{fmt, marker::PhantomData, ptr::NonNull, sync::atomic::Ordering};

use crossbeam_utils::atomic::AtomicCell;

use crate::{
    encoding::NonNullValue,
    handle::Handle,
    ordering::{LoadOrdering, StoreOrdering, UpdateOrdering},
    primitive,
};

/// A value that fits in one machine word of an [`AtomicPair`].
///
/// # Safety
///
/// `decode_word(encode_word(v)) == v` for every `v`, and equal values encode
/// to equal words.
pub unsafe trait PairElement: Copy {
    /// Encodes `self` as a machine word.
    fn encode_word(self) -> usize;

    /// Decodes a word produced by [`encode_word`](Self::encode_word).
    fn decode_word(word: usize) -> Self;
}

macro_rules! impl_pair_integer {
    ($($t:ty),+) => {$(
        // SAFETY: sign-extending then truncating restores the value.
        unsafe impl PairElement for $t {
            #[inline(always)]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
            fn encode_word(self) -> usize {
                self as usize
            }

            #[inline(always)]
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
            fn decode_word(word: usize) -> Self {
                word as $t
            }
        }
    )+};
}

impl_pair_integer!(i8, u8, i16, u16, i32, u32, isize, usize);

#[cfg(target_pointer_width = "64")]
impl_pair_integer!(i64, u64);

// SAFETY: 0 and 1 round-trip.
unsafe impl PairElement for bool {
    #[inline(always)]
    fn encode_word(self) -> usize {
        usize::from(self)
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        word != 0
    }
}

// SAFETY: the address round-trips through an exposed integer.
unsafe impl<T> PairElement for *const T {
    #[inline(always)]
    fn encode_word(self) -> usize {
        self as usize
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        word as *const T
    }
}

// SAFETY: the address round-trips through an exposed integer.
unsafe impl<T> PairElement for *mut T {
    #[inline(always)]
    fn encode_word(self) -> usize {
        self as usize
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        word as *mut T
    }
}

// SAFETY: a non-null address encodes to a non-zero word and back.
unsafe impl<T> PairElement for NonNull<T> {
    #[inline(always)]
    fn encode_word(self) -> usize {
        self.as_ptr() as usize
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        debug_assert!(word != 0, "decoded a zero word as a non-null pointer");
        // SAFETY: non-null elements are only ever written through `encode_word`.
        unsafe { NonNull::new_unchecked(word as *mut T) }
    }
}

// SAFETY: delegates to the handle's non-null address.
unsafe impl<T> PairElement for Handle<T> {
    #[inline(always)]
    fn encode_word(self) -> usize {
        self.as_non_null().encode_word()
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        // SAFETY: handle elements are only ever written through `encode_word`.
        unsafe { Handle::from_non_null(NonNull::decode_word(word)) }
    }
}

// SAFETY: non-null elements never encode to zero, so zero is free for `None`.
unsafe impl<T: NonNullValue + PairElement> PairElement for Option<T> {
    #[inline(always)]
    fn encode_word(self) -> usize {
        self.map_or(0, PairElement::encode_word)
    }

    #[inline(always)]
    fn decode_word(word: usize) -> Self {
        (word != 0).then(|| T::decode_word(word))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_pointer_width = "64", repr(C, align(16)))]
#[cfg_attr(not(target_pointer_width = "64"), repr(C, align(8)))]
struct DoubleWord {
    first: usize,
    second: usize,
}

/// An atomic pair of word-sized values.
pub struct AtomicPair<A: PairElement, B: PairElement> {
    cell: AtomicCell<DoubleWord>,
    _values: PhantomData<(A, B)>,
}

impl<A: PairElement, B: PairElement> AtomicPair<A, B> {
    /// Creates a new pair cell.
    pub fn new(values: (A, B)) -> Self {
        #[cfg(feature = "tracing")]
        if !AtomicCell::<DoubleWord>::is_lock_free() {
            tracing::debug!(
                size = core::mem::size_of::<DoubleWord>(),
                "double-width atomics unavailable; pair uses lock-striped emulation"
            );
        }
        Self {
            cell: AtomicCell::new(encode(values)),
            _values: PhantomData,
        }
    }

    /// Consumes the cell and returns its values.
    pub fn into_inner(self) -> (A, B) {
        decode(self.cell.into_inner())
    }

    /// Returns `true` if the pair uses native double-width atomics on this
    /// target rather than lock-striped emulation.
    #[inline]
    pub fn is_lock_free(&self) -> bool {
        AtomicCell::<DoubleWord>::is_lock_free()
    }

    /// Loads both values.
    #[inline]
    pub fn load(&self, order: LoadOrdering) -> (A, B) {
        sequenced(order == LoadOrdering::SequentiallyConsistent, || decode(self.cell.load()))
    }

    /// Stores both values.
    #[inline]
    pub fn store(&self, values: (A, B), order: StoreOrdering) {
        sequenced(order == StoreOrdering::SequentiallyConsistent, || self.cell.store(encode(values)));
    }

    /// Stores both values, returning the previous pair.
    #[inline]
    pub fn exchange(&self, values: (A, B), order: UpdateOrdering) -> (A, B) {
        sequenced(order == UpdateOrdering::SequentiallyConsistent, || {
            decode(self.cell.swap(encode(values)))
        })
    }

    /// Stores `new` if the cell holds `current`; never fails spuriously.
    #[inline]
    pub fn compare_exchange(
        &self,
        current: (A, B),
        new: (A, B),
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<(A, B), (A, B)> {
        let total = success == UpdateOrdering::SequentiallyConsistent
            || failure == LoadOrdering::SequentiallyConsistent;
        sequenced(total, || {
            self.cell
                .compare_exchange(encode(current), encode(new))
                .map(decode)
                .map_err(decode)
        })
    }

    /// Weak compare-exchange. The pair cell has no cheaper weak form, so this
    /// never fails spuriously either.
    #[inline]
    pub fn compare_exchange_weak(
        &self,
        current: (A, B),
        new: (A, B),
        success: UpdateOrdering,
        failure: LoadOrdering,
    ) -> Result<(A, B), (A, B)> {
        self.compare_exchange(current, new, success, failure)
    }

    /// Compare-exchange against `*expected`, writing the actual pair into it
    /// on failure.
    pub fn compare_exchange_in_place(
        &self,
        expected: &mut (A, B),
        desired: (A, B),
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
}

impl<A: PairElement + fmt::Debug, B: PairElement + fmt::Debug> fmt::Debug for AtomicPair<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.load(LoadOrdering::SequentiallyConsistent);
        f.debug_tuple("AtomicPair").field(&a).field(&b).finish()
    }
}

// SAFETY: the cell only holds plain words; `A` and `B` mark how they decode.
unsafe impl<A: PairElement, B: PairElement> Send for AtomicPair<A, B> {}
unsafe impl<A: PairElement, B: PairElement> Sync for AtomicPair<A, B> {}

/// Runs `op`, fenced on both sides with `SeqCst` when `total` is set.
#[inline(always)]
fn sequenced<R>(total: bool, op: impl FnOnce() -> R) -> R {
    if total {
        primitive::fence(Ordering::SeqCst);
    }
    let result = op();
    if total {
        primitive::fence(Ordering::SeqCst);
    }
    result
}

#[inline(always)]
fn encode<A: PairElement, B: PairElement>((a, b): (A, B)) -> DoubleWord {
    DoubleWord {
        first: a.encode_word(),
        second: b.encode_word(),
    }
}

#[inline(always)]
fn decode<A: PairElement, B: PairElement>(w: DoubleWord) -> (A, B) {
    (A::decode_word(w.first), B::decode_word(w.second))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_elements_round_trip() {
        let pair = AtomicPair::new((-1i8, i32::MIN));
        assert_eq!(pair.load(LoadOrdering::Relaxed), (-1, i32::MIN));
        assert_eq!(pair.into_inner(), (-1, i32::MIN));
    }

    #[test]
    fn sequentially_consistent_requests_take_the_fenced_path() {
        let pair = AtomicPair::new((1u32, 2u32));
        pair.store((3, 4), StoreOrdering::SequentiallyConsistent);
        assert_eq!(pair.load(LoadOrdering::SequentiallyConsistent), (3, 4));
        assert_eq!(pair.exchange((5, 6), UpdateOrdering::SequentiallyConsistent), (3, 4));
        // Only the failure side asks for total order.
        assert_eq!(
            pair.compare_exchange((0, 0), (7, 8), UpdateOrdering::Relaxed, LoadOrdering::SequentiallyConsistent),
            Err((5, 6))
        );
        assert_eq!(
            pair.compare_exchange((5, 6), (7, 8), UpdateOrdering::SequentiallyConsistent, LoadOrdering::Relaxed),
            Ok((5, 6))
        );
        assert_eq!(sequenced(true, || 9), 9);
        assert_eq!(sequenced(false, || 10), 10);
    }

    #[test]
    fn optional_pointers_use_zero_for_none() {
        assert_eq!(None::<NonNull<u8>>.encode_word(), 0);
        assert_eq!(Option::<NonNull<u8>>::decode_word(0), None);
        let mut x = 1u8;
        let p = NonNull::from(&mut x);
        assert_eq!(Option::<NonNull<u8>>::decode_word(Some(p).encode_word()), Some(p));
    }
}
