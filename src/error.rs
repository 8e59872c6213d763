//! Error taxonomy. Construction errors are ordinary `Result`s; everything
//! the scheduler core itself can fail on is fatal and terminates the
//! offending thread (and, per spec, the process) rather than being
//! recoverable — see `scheduler.rs` for where `.expect()` stands in for
//! that policy.

use thiserror::Error;

use crate::node::NodeId;

/// Errors that can occur while assembling a [`crate::graph::Graph`].
///
/// This is deliberately shallow: cycle detection and other semantic
/// validation are out of scope (the graph is assumed acyclic), so this only
/// catches the handful of mistakes a safe builder API cannot avoid without
/// `unsafe`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphBuildError {
    #[error("duplicate node label {label:?}")]
    DuplicateLabel { label: String },
    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),
    #[error("no entry node was designated")]
    MissingEntry,
    #[error("no terminal node was designated")]
    MissingTerminal,
    #[error("entry node {0} has nonzero in-degree")]
    EntryHasDependencies(NodeId),
}

/// Errors returned by [`crate::scheduler::Scheduler::run`] before any worker
/// has been started. Once workers are running, failures are fatal per the
/// spec's propagation policy and surface as a thread panic, not as a
/// `SchedulerError`.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
