//! Per-loop execution trace, used to verify dependency-respecting order.

use std::sync::Mutex;

use crate::node::NodeId;

/// Append-only sequence of node events for the loop currently in flight.
///
/// Each task execution contributes exactly two entries: one immediately
/// before the task body runs, one immediately after. Sized for
/// `2 * node_count` entries and reset once per loop boundary.
pub(crate) struct ExecutionTrace {
    entries: Mutex<Vec<NodeId>>,
}

impl ExecutionTrace {
    pub fn new(node_count: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::with_capacity(2 * node_count)),
        }
    }

    pub fn append(&self, node: NodeId) {
        self.entries
            .lock()
            .expect("trace mutex poisoned")
            .push(node);
    }

    pub fn reset(&self) {
        self.entries.lock().expect("trace mutex poisoned").clear();
    }

    pub fn snapshot(&self) -> Vec<NodeId> {
        self.entries.lock().expect("trace mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_accumulates_in_order() {
        let trace = ExecutionTrace::new(3);
        trace.append(NodeId(0));
        trace.append(NodeId(1));
        trace.append(NodeId(0));

        assert_eq!(trace.snapshot(), vec![NodeId(0), NodeId(1), NodeId(0)]);
    }

    #[test]
    fn reset_clears_entries() {
        let trace = ExecutionTrace::new(1);
        trace.append(NodeId(0));
        trace.reset();

        assert!(trace.snapshot().is_empty());
    }
}
