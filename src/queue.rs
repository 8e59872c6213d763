//! FIFO ready queue: nodes whose dependencies have all arrived.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::node::NodeId;

struct Inner {
    items: VecDeque<NodeId>,
    shutdown: bool,
}

/// Single-mutex, single-condvar FIFO queue shared by all workers.
///
/// `pop_blocking` blocks until either an item is available or shutdown has
/// been requested; `push` and `shutdown` both broadcast, since more than one
/// worker may be waiting and both conditions share the same condvar.
pub(crate) struct ReadyQueue {
    inner: Mutex<Inner>,
    condvar: Condvar,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::new(),
                shutdown: false,
            }),
            condvar: Condvar::new(),
        }
    }

    pub fn push(&self, node: NodeId) {
        let mut inner = self.inner.lock().expect("ready queue mutex poisoned");
        inner.items.push_back(node);
        drop(inner);
        self.condvar.notify_all();
    }

    /// Blocks until a node is ready or shutdown has been requested.
    pub fn pop_blocking(&self) -> Option<NodeId> {
        let mut inner = self.inner.lock().expect("ready queue mutex poisoned");
        loop {
            if let Some(node) = inner.items.pop_front() {
                return Some(node);
            }
            if inner.shutdown {
                return None;
            }
            inner = self
                .condvar
                .wait(inner)
                .expect("ready queue condvar poisoned");
        }
    }

    pub fn shutdown(&self) {
        let mut inner = self.inner.lock().expect("ready queue mutex poisoned");
        inner.shutdown = true;
        drop(inner);
        self.condvar.notify_all();
    }

    /// Number of non-sentinel entries currently queued. Used by tests to
    /// check I5 after `join()` returns.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("ready queue mutex poisoned").items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn fifo_order_is_preserved() {
        let queue = ReadyQueue::new();
        queue.push(NodeId(0));
        queue.push(NodeId(1));
        queue.push(NodeId(2));

        assert_eq!(queue.pop_blocking(), Some(NodeId(0)));
        assert_eq!(queue.pop_blocking(), Some(NodeId(1)));
        assert_eq!(queue.pop_blocking(), Some(NodeId(2)));
    }

    #[test]
    fn pop_blocks_until_push() {
        let queue = Arc::new(ReadyQueue::new());
        let queue_clone = Arc::clone(&queue);

        let handle = thread::spawn(move || queue_clone.pop_blocking());

        thread::sleep(Duration::from_millis(50));
        queue.push(NodeId(7));

        assert_eq!(handle.join().unwrap(), Some(NodeId(7)));
    }

    #[test]
    fn shutdown_wakes_blocked_pop_with_none() {
        let queue = Arc::new(ReadyQueue::new());
        let queue_clone = Arc::clone(&queue);

        let handle = thread::spawn(move || queue_clone.pop_blocking());

        thread::sleep(Duration::from_millis(50));
        queue.shutdown();

        assert_eq!(handle.join().unwrap(), None);
    }

    #[test]
    fn shutdown_after_items_still_drains_fifo_first() {
        let queue = ReadyQueue::new();
        queue.push(NodeId(0));
        queue.shutdown();

        assert_eq!(queue.pop_blocking(), Some(NodeId(0)));
        assert_eq!(queue.pop_blocking(), None);
        assert_eq!(queue.len(), 0);
    }
}
