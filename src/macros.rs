/// Makes a user type atomic by encoding it through an existing atomic type.
///
/// `encode` and `decode` must be inverse conversions between the type and its
/// raw representation, and equal values must convert to equal raw values;
/// compare-exchange compares the raw bits.
///
/// ```rust
/// use typed_atomics::{atomic_repr, Atomic, LoadOrdering, UpdateOrdering};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// #[repr(u8)]
/// enum Phase {
///     Idle = 0,
///     Running = 1,
///     Done = 2,
/// }
///
/// atomic_repr! {
///     Phase as u8 {
///         encode: |p: Phase| p as u8,
///         decode: |raw: u8| match raw {
///             0 => Phase::Idle,
///             1 => Phase::Running,
///             _ => Phase::Done,
///         },
///     }
/// }
///
/// let phase = Atomic::new(Phase::Idle);
/// assert_eq!(phase.exchange(Phase::Running, UpdateOrdering::AcquireRelease), Phase::Idle);
/// assert_eq!(phase.load(LoadOrdering::Acquire), Phase::Running);
/// ```
///
/// Prefixing the invocation with `pair` also implements
/// [`PairElement`](crate::PairElement) through the raw type, so the value can
/// be one half of an [`AtomicPair`](crate::AtomicPair):
///
/// ```rust
/// use typed_atomics::{atomic_repr, AtomicPair, LoadOrdering};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Generation(u32);
///
/// atomic_repr! {
///     pair Generation as u32 {
///         encode: |g: Generation| g.0,
///         decode: Generation,
///     }
/// }
///
/// let slot = AtomicPair::new((Generation(1), 0usize));
/// assert_eq!(slot.load(LoadOrdering::Acquire), (Generation(1), 0));
/// ```
#[macro_export]
macro_rules! atomic_repr {
    (pair $ty:ty as $raw:ty { encode: $encode:expr, decode: $decode:expr $(,)? }) => {
        $crate::atomic_repr! { $ty as $raw { encode: $encode, decode: $decode } }

        // SAFETY: words are only produced by `$raw`'s own pair encoding, and
        // the macro caller supplies inverse conversions.
        unsafe impl $crate::PairElement for $ty {
            #[inline(always)]
            fn encode_word(self) -> usize {
                let raw: $raw = ($encode)(self);
                <$raw as $crate::PairElement>::encode_word(raw)
            }

            #[inline(always)]
            fn decode_word(word: usize) -> Self {
                ($decode)(<$raw as $crate::PairElement>::decode_word(word))
            }
        }
    };
    ($ty:ty as $raw:ty { encode: $encode:expr, decode: $decode:expr $(,)? }) => {
        // SAFETY: bits are only produced by `$raw`'s own encoding, and the
        // macro caller supplies inverse conversions.
        unsafe impl $crate::AtomicValue for $ty {
            type Storage = <$raw as $crate::AtomicValue>::Storage;

            #[inline(always)]
            fn encode(self) -> $crate::Bits<$raw> {
                let raw: $raw = ($encode)(self);
                <$raw as $crate::AtomicValue>::encode(raw)
            }

            #[inline(always)]
            fn decode(bits: $crate::Bits<$raw>) -> Self {
                ($decode)(<$raw as $crate::AtomicValue>::decode(bits))
            }
        }
    };
}
