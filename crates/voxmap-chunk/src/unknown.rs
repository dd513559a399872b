use std::sync::atomic::{AtomicBool, Ordering};

/// Records whether ingestion met a block id outside the catalogue.
///
/// Shared by reference between the loader and whoever reports the flag.
#[derive(Debug, Default)]
pub struct UnknownBlockMonitor {
    check: AtomicBool,
    seen: AtomicBool,
}

impl UnknownBlockMonitor {
    pub fn new(check: bool) -> Self {
        Self {
            check: AtomicBool::new(check),
            seen: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn set_check(&self, check: bool) {
        self.check.store(check, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_checking(&self) -> bool {
        self.check.load(Ordering::Relaxed)
    }

    /// Flag an unknown id; ignored while checking is off.
    #[inline]
    pub fn report(&self) {
        if self.is_checking() {
            self.seen.store(true, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn seen(&self) -> bool {
        self.seen.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.seen.store(false, Ordering::Relaxed);
    }
}
