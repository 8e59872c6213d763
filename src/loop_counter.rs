//! The counter the entry task is contractually required to increment.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Shared handle to the current loop index.
///
/// The scheduler does not know, or need to know, *how* the entry node's task
/// advances the loop — only that it does. Callers build the entry task's
/// closure around a clone of this handle and hand the same handle to
/// [`crate::scheduler::Scheduler::new`].
#[derive(Clone)]
pub struct LoopCounter(Arc<AtomicU32>);

impl LoopCounter {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU32::new(0)))
    }

    /// Called by the entry node's task, once per loop.
    pub fn increment(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    pub fn get(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for LoopCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_are_visible_through_clones() {
        let counter = LoopCounter::new();
        let clone = counter.clone();
        clone.increment();
        clone.increment();
        assert_eq!(counter.get(), 2);
    }
}
