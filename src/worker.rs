//! The worker thread protocol: pop, run, record, reset, notify children.

use std::sync::atomic::Ordering;

use log::{debug, trace};

use crate::scheduler::Shared;

/// Runs until the ready queue reports shutdown. One of these runs per pool
/// worker thread; `id` is only used for log messages.
pub(crate) fn run(id: usize, shared: &Shared) {
    shared.workers_alive.fetch_add(1, Ordering::AcqRel);
    debug!("worker {id} started");

    loop {
        let Some(node) = shared.queue.pop_blocking() else {
            break;
        };

        let label = shared.graph.label(node);
        trace!("worker {id} running {label}");

        shared.trace.append(node);
        {
            let mut task = shared
                .graph
                .state_of(node)
                .task
                .lock()
                .expect("task mutex poisoned");
            (task)();
        }
        shared.trace.append(node);

        shared.graph.state_of(node).reset_arrivals();

        if node == shared.graph.terminal() {
            shared.on_terminal_complete();
        } else {
            for &child in shared.graph.children_of(node) {
                let required = shared.graph.required(child);
                if shared.graph.state_of(child).arrive(required) {
                    trace!("worker {id} enqueues {}", shared.graph.label(child));
                    shared.queue.push(child);
                }
            }
        }
    }

    debug!("worker {id} exiting");
}
