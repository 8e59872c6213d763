//! The scheduler/pool: owns the workers, the ready queue, loop bookkeeping,
//! and the start/stop protocol.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::{debug, info};

use crate::error::SchedulerError;
use crate::graph::Graph;
use crate::loop_counter::LoopCounter;
use crate::node::NodeId;
use crate::queue::ReadyQueue;
use crate::trace::ExecutionTrace;

/// `Constructed -> Running -> Draining -> Joined`. Terminal is absorbing;
/// there is no path back to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PoolState {
    Constructed,
    Running,
    Draining,
    Joined,
}

/// Context shared by every worker thread. Grouping it here (rather than as
/// process-wide globals, as the reference implementation does) is what makes
/// more than one [`Scheduler`] in a process safe: each owns its own `Shared`.
pub(crate) struct Shared {
    pub graph: Arc<Graph>,
    pub queue: ReadyQueue,
    pub trace: ExecutionTrace,
    pub workers_alive: AtomicUsize,
    loop_counter: LoopCounter,
    loops_target: u32,
}

impl Shared {
    /// Invoked by the worker that just finished the terminal node's task.
    /// Either re-seeds the entry node for the next loop, or requests
    /// shutdown if `loops_target` has been reached.
    pub(crate) fn on_terminal_complete(&self) {
        let current = self.loop_counter.get();
        debug!("loop {current}/{} complete", self.loops_target);

        if current >= self.loops_target {
            info!("reached loop target, shutting down");
            self.queue.shutdown();
        } else {
            self.trace.reset();
            self.queue.push(self.graph.entry());
        }
    }
}

/// Owns a pool of worker threads executing one [`Graph`] over a fixed number
/// of loops.
pub struct Scheduler {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    state: Mutex<PoolState>,
}

impl Scheduler {
    /// Spawns `pool_size` worker threads. Blocks (briefly, bounded) until
    /// every worker has confirmed it reached its main loop, so that no
    /// worker can miss the first enqueue done by [`Scheduler::run`].
    pub fn new(
        graph: Arc<Graph>,
        loop_counter: LoopCounter,
        pool_size: NonZeroUsize,
        loops_target: u32,
    ) -> Result<Self, SchedulerError> {
        let node_count = graph.node_count();
        let shared = Arc::new(Shared {
            graph,
            queue: ReadyQueue::new(),
            trace: ExecutionTrace::new(node_count),
            workers_alive: AtomicUsize::new(0),
            loop_counter,
            loops_target,
        });

        let mut workers = Vec::with_capacity(pool_size.get());
        for id in 0..pool_size.get() {
            let shared = Arc::clone(&shared);
            let handle = std::thread::Builder::new()
                .name(format!("loopgraph-worker-{id}"))
                .spawn(move || crate::worker::run(id, &shared))
                .map_err(SchedulerError::WorkerSpawn)?;
            workers.push(handle);
        }

        while shared.workers_alive.load(Ordering::Acquire) != pool_size.get() {
            std::thread::yield_now();
        }

        Ok(Self {
            shared,
            workers,
            state: Mutex::new(PoolState::Constructed),
        })
    }

    /// Starts execution: resets the trace and seeds the ready queue with the
    /// entry node. The entry task's own first invocation will bump the loop
    /// counter from 0 to 1.
    pub fn run(&self) {
        let mut state = self.state.lock().expect("scheduler state mutex poisoned");
        debug_assert_eq!(*state, PoolState::Constructed, "run() called more than once");
        self.shared.trace.reset();
        self.shared.queue.push(self.shared.graph.entry());
        *state = PoolState::Running;
        debug!("scheduler running");
    }

    /// Blocks until every worker thread has exited. Must be called after
    /// shutdown has been requested (i.e. after the configured number of
    /// loops has completed) or it blocks forever.
    pub fn join(mut self) {
        {
            let mut state = self.state.lock().expect("scheduler state mutex poisoned");
            *state = PoolState::Draining;
        }
        for handle in self.workers.drain(..) {
            handle.join().expect("worker thread panicked");
        }
        *self.state.lock().expect("scheduler state mutex poisoned") = PoolState::Joined;
        debug!("scheduler joined");
    }

    /// The execution trace for the loop most recently completed (or, while a
    /// loop is in flight, accumulated so far).
    pub fn last_trace(&self) -> Vec<NodeId> {
        self.shared.trace.snapshot()
    }

    pub fn loop_index(&self) -> u32 {
        self.shared.loop_counter.get()
    }
}
