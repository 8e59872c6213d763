//! A single DAG node: its task, its dependency counters, and its adjacency.

use std::fmt;
use std::sync::Mutex;

/// Opaque, stable index into a [`crate::graph::Graph`]'s node arena.
///
/// Arena indices avoid the parent/child reference cycles that an
/// owning-pointer representation of a DAG would otherwise require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A task is any no-argument, possibly-blocking unit of work that can be run
/// repeatedly, once per loop, from any worker thread.
pub type Task = Box<dyn FnMut() + Send>;

/// One node's immutable topology, fixed at construction time.
pub(crate) struct NodeTopology {
    pub label: String,
    pub required: u32,
    pub children: Vec<NodeId>,
    pub parents: Vec<NodeId>,
}

/// One node's task body and the mutex-guarded arrival counter it needs at
/// runtime. `satisfied` is the only field any worker mutates after
/// construction, and only ever under `arrivals`.
pub(crate) struct NodeState {
    pub task: Mutex<Task>,
    arrivals: Mutex<u32>,
}

impl NodeState {
    pub(crate) fn new(task: Task) -> Self {
        Self {
            task: Mutex::new(task),
            arrivals: Mutex::new(0),
        }
    }

    /// Sets `satisfied := 0`. Called by the worker that just finished this
    /// node's task, before it notifies any children.
    pub(crate) fn reset_arrivals(&self) {
        let mut satisfied = self.arrivals.lock().expect("node mutex poisoned");
        *satisfied = 0;
    }

    /// Records one parent's arrival. Returns whether this arrival was the
    /// last one required, i.e. `satisfied == required` now holds.
    pub(crate) fn arrive(&self, required: u32) -> bool {
        let mut satisfied = self.arrivals.lock().expect("node mutex poisoned");
        *satisfied += 1;
        debug_assert!(*satisfied <= required, "arrival count exceeded required");
        *satisfied == required
    }
}
