//! A concurrent scheduler for a fixed DAG of tasks, executed repeatedly over
//! a configured number of loops by a fixed pool of worker threads.
//!
//! The graph is built once via [`graph::GraphBuilder`], then handed to a
//! [`scheduler::Scheduler`] which drives it to completion: each loop starts
//! at the graph's entry node and ends at its terminal node, with every node
//! in between running once its parents have all completed for that loop.

pub mod error;
pub mod graph;
pub mod loop_counter;
pub mod node;
pub mod scheduler;

mod fmt;
mod queue;
mod trace;
mod worker;

pub use error::{GraphBuildError, SchedulerError};
pub use graph::{Graph, GraphBuilder};
pub use loop_counter::LoopCounter;
pub use node::{NodeId, Task};
pub use scheduler::Scheduler;
