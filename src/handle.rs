//! Opaque, pointer-sized handles to `Arc`-managed values.

use core::{fmt, marker::PhantomData, ptr::NonNull};
use std::sync::Arc;

/// A non-owning, non-null handle to a value managed by an [`Arc`].
///
/// A handle is just the value's address: it is `Copy`, does not touch the
/// reference count when copied or dropped, and can be stored in an
/// [`Atomic`](crate::Atomic) cell (`Option<Handle<T>>` for the nullable form).
/// Whether a handle carries a strong count is up to the code that created it:
/// [`from_arc`](Self::from_arc) passes one in, [`from_arc_ref`](Self::from_arc_ref)
/// does not, and [`into_arc`](Self::into_arc) takes one back out.
#[repr(transparent)]
pub struct Handle<T> {
    ptr: NonNull<T>,
    _owns: PhantomData<*const T>,
}

impl<T> Handle<T> {
    /// Converts an `Arc` into a handle that carries its strong count.
    ///
    /// The count is only released by a matching [`into_arc`](Self::into_arc).
    #[inline]
    pub fn from_arc(arc: Arc<T>) -> Self {
        let raw = Arc::into_raw(arc).cast_mut();
        // SAFETY: `Arc::into_raw` never returns null.
        unsafe { Self::from_non_null(NonNull::new_unchecked(raw)) }
    }

    /// Creates a handle to the value behind `arc` without retaining it.
    #[inline]
    pub fn from_arc_ref(arc: &Arc<T>) -> Self {
        // SAFETY: `Arc::as_ptr` never returns null.
        unsafe { Self::from_non_null(NonNull::new_unchecked(Arc::as_ptr(arc).cast_mut())) }
    }

    /// Rebuilds a handle from an address.
    ///
    /// # Safety
    /// `ptr` must have come from [`as_non_null`](Self::as_non_null) on a handle
    /// to a value that is still alive.
    #[inline(always)]
    pub const unsafe fn from_non_null(ptr: NonNull<T>) -> Self {
        Self {
            ptr,
            _owns: PhantomData,
        }
    }

    /// Takes the strong count carried by this handle back into an `Arc`.
    ///
    /// # Safety
    /// The handle must carry a strong count (created by
    /// [`from_arc`](Self::from_arc)) that has not already been taken back.
    #[inline]
    pub unsafe fn into_arc(self) -> Arc<T> {
        Arc::from_raw(self.ptr.as_ptr().cast_const())
    }

    /// Returns a new `Arc` to the value, adding one strong count.
    ///
    /// # Safety
    /// The value must still be alive (some strong count is outstanding).
    #[inline]
    pub unsafe fn clone_arc(self) -> Arc<T> {
        let raw = self.ptr.as_ptr().cast_const();
        Arc::increment_strong_count(raw);
        Arc::from_raw(raw)
    }

    /// Borrows the value.
    ///
    /// # Safety
    /// The value must stay alive for `'a`.
    #[inline(always)]
    pub unsafe fn as_ref<'a>(self) -> &'a T {
        &*self.ptr.as_ptr()
    }

    /// The value's address.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const T {
        self.ptr.as_ptr().cast_const()
    }

    /// The value's address as a `NonNull`.
    #[inline(always)]
    pub const fn as_non_null(self) -> NonNull<T> {
        self.ptr
    }
}

impl<T> Clone for Handle<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for Handle<T> {}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.ptr).finish()
    }
}

impl<T> fmt::Pointer for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.ptr, f)
    }
}
