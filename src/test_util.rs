use std::sync::atomic::{AtomicUsize, Ordering};

use enough::{Stop, StopReason};

/// Passes `remaining` checks, then reports cancellation on every later one.
pub(crate) struct StopAfter {
    remaining: AtomicUsize,
}

impl StopAfter {
    pub(crate) fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl Stop for StopAfter {
    fn check(&self) -> Result<(), StopReason> {
        self.remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| StopReason::Cancelled)
    }
}
