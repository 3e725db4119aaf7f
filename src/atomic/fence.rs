use crate::{ordering::FenceOrdering, primitive};

/// Issues a standalone memory fence.
///
/// A fence is not tied to any cell. A release fence followed by a relaxed
/// store synchronizes with an acquire fence preceded by a relaxed load that
/// reads that store. `Relaxed` is not a fence ordering, so it cannot be passed.
#[inline(always)]
pub fn fence(order: FenceOrdering) {
    primitive::fence(order.to_core());
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;
    use crate::{
        ordering::{LoadOrdering, StoreOrdering},
        Atomic,
    };
    use std::thread;

    #[test]
    fn release_acquire_fences_publish_data() {
        let data = Atomic::new(0u64);
        let ready = Atomic::new(false);

        thread::scope(|s| {
            s.spawn(|| {
                data.store(42, StoreOrdering::Relaxed);
                fence(FenceOrdering::Release);
                ready.store(true, StoreOrdering::Relaxed);
            });
            s.spawn(|| {
                while !ready.load(LoadOrdering::Relaxed) {
                    std::hint::spin_loop();
                }
                fence(FenceOrdering::Acquire);
                assert_eq!(data.load(LoadOrdering::Relaxed), 42);
            });
        });
    }
}
