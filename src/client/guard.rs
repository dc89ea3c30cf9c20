use std::sync::atomic::{AtomicBool, Ordering};

/// Holds the collector's "submitting" flag for the lifetime of one attempt.
///
/// The flag is cleared on drop, so it is released on every exit path: a
/// normal return, an early `?`, a panic, or the submit future being dropped.
#[derive(Debug)]
pub struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmittingGuard<'a> {
    /// Returns `None` when another attempt already holds the flag.
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
