use core::ptr::{self, NonNull};

use super::{AtomicValue, NonNullValue};
use crate::{handle::Handle, primitive::AtomicPtr};

// SAFETY: the address is carried unchanged; null stays null.
unsafe impl<T> AtomicValue for *const T {
    type Storage = AtomicPtr<()>;

    #[inline(always)]
    fn encode(self) -> *mut () {
        self.cast_mut().cast()
    }

    #[inline(always)]
    fn decode(bits: *mut ()) -> Self {
        bits.cast_const().cast()
    }
}

// SAFETY: the address is carried unchanged; null stays null.
unsafe impl<T> AtomicValue for *mut T {
    type Storage = AtomicPtr<()>;

    #[inline(always)]
    fn encode(self) -> *mut () {
        self.cast()
    }

    #[inline(always)]
    fn decode(bits: *mut ()) -> Self {
        bits.cast()
    }
}

// SAFETY: a `NonNull` encodes to its (non-null) address, so the only patterns
// a `NonNull` cell ever holds are non-null.
unsafe impl<T> AtomicValue for NonNull<T> {
    type Storage = AtomicPtr<()>;

    #[inline(always)]
    fn encode(self) -> *mut () {
        self.as_ptr().cast()
    }

    #[inline(always)]
    fn decode(bits: *mut ()) -> Self {
        debug_assert!(!bits.is_null(), "decoded the null address as a non-null pointer");
        // SAFETY: non-null cells are only ever written through `encode`.
        unsafe { NonNull::new_unchecked(bits.cast()) }
    }
}

// SAFETY: `NonNull::encode` is `as_ptr`, never null.
unsafe impl<T> NonNullValue for NonNull<T> {}

// SAFETY: delegates to the handle's non-null address.
unsafe impl<T> AtomicValue for Handle<T> {
    type Storage = AtomicPtr<()>;

    #[inline(always)]
    fn encode(self) -> *mut () {
        NonNull::encode(self.as_non_null())
    }

    #[inline(always)]
    fn decode(bits: *mut ()) -> Self {
        // SAFETY: handle cells are only ever written through `encode`, so the
        // address came from a live handle.
        unsafe { Handle::from_non_null(NonNull::decode(bits)) }
    }
}

// SAFETY: a handle wraps a `NonNull`.
unsafe impl<T> NonNullValue for Handle<T> {}

// SAFETY: `Some(v)` encodes as `v` (never null by the `NonNullValue`
// contract), `None` as null, so decoding is unambiguous.
unsafe impl<T: NonNullValue> AtomicValue for Option<T> {
    type Storage = AtomicPtr<()>;

    #[inline(always)]
    fn encode(self) -> *mut () {
        match self {
            Some(v) => v.encode(),
            None => ptr::null_mut(),
        }
    }

    #[inline(always)]
    fn decode(bits: *mut ()) -> Self {
        if bits.is_null() {
            None
        } else {
            Some(T::decode(bits))
        }
    }
}
