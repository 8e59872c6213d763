//! Graph construction. This is the "external collaborator" the scheduler
//! core depends on but does not implement itself: building the DAG, looking
//! up nodes by label, and deciding which nodes are the entry/terminal are
//! routine plumbing, not part of the scheduling algorithm.

use std::collections::HashMap;

use crate::error::GraphBuildError;
use crate::node::{NodeId, NodeState, NodeTopology, Task};

/// An immutable, acyclic DAG of tasks, ready to be handed to a
/// [`crate::scheduler::Scheduler`].
///
/// Nodes are addressed by [`NodeId`], a stable arena index; there is no
/// owning pointer between a node and its children or parents, so the
/// topology carries no reference cycles.
pub struct Graph {
    pub(crate) topology: Vec<NodeTopology>,
    pub(crate) state: Vec<NodeState>,
    pub(crate) entry: NodeId,
    pub(crate) terminal: NodeId,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.topology.len()
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    pub fn terminal(&self) -> NodeId {
        self.terminal
    }

    pub fn label(&self, node: NodeId) -> &str {
        &self.topology[node.index()].label
    }

    pub fn required(&self, node: NodeId) -> u32 {
        self.topology[node.index()].required
    }

    pub fn children_of(&self, node: NodeId) -> &[NodeId] {
        &self.topology[node.index()].children
    }

    pub fn parents_of(&self, node: NodeId) -> &[NodeId] {
        &self.topology[node.index()].parents
    }

    pub(crate) fn state_of(&self, node: NodeId) -> &NodeState {
        &self.state[node.index()]
    }

    /// The node whose label matches, searched without regard to topology
    /// (the "node-lookup helper" of the spec's external interfaces).
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.topology
            .iter()
            .position(|n| n.label == label)
            .map(|i| NodeId(i as u32))
    }
}

struct PendingNode {
    label: String,
    task: Task,
    children: Vec<NodeId>,
    parents: Vec<NodeId>,
}

/// Builds a [`Graph`] one node and edge at a time.
///
/// # Examples
/// ```
/// use loopgraph::graph::GraphBuilder;
///
/// let mut builder = GraphBuilder::new();
/// let a = builder.add_node("A", || {});
/// let b = builder.add_node("B", || {});
/// builder.add_edge(a, b);
/// builder.set_entry(a);
/// builder.set_terminal(b);
/// let graph = builder.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// ```
pub struct GraphBuilder {
    nodes: Vec<PendingNode>,
    labels: HashMap<String, NodeId>,
    entry: Option<NodeId>,
    terminal: Option<NodeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            labels: HashMap::new(),
            entry: None,
            terminal: None,
        }
    }

    /// Adds a node whose task body is `task`. Panics if `label` was already
    /// used — duplicate labels are a construction-time programmer error,
    /// not a runtime condition the builder tries to recover from.
    ///
    /// Use [`GraphBuilder::try_add_node`] to get a `Result` instead.
    pub fn add_node<F>(&mut self, label: impl Into<String>, task: F) -> NodeId
    where
        F: FnMut() + Send + 'static,
    {
        self.try_add_node(label, task).expect("duplicate node label")
    }

    pub fn try_add_node<F>(
        &mut self,
        label: impl Into<String>,
        task: F,
    ) -> Result<NodeId, GraphBuildError>
    where
        F: FnMut() + Send + 'static,
    {
        let label = label.into();
        if self.labels.contains_key(&label) {
            return Err(GraphBuildError::DuplicateLabel { label });
        }

        let id = NodeId(self.nodes.len() as u32);
        self.labels.insert(label.clone(), id);
        self.nodes.push(PendingNode {
            label,
            task: Box::new(task),
            children: Vec::new(),
            parents: Vec::new(),
        });
        Ok(id)
    }

    /// Adds an edge `parent -> child`, incrementing `child`'s `required`
    /// count. Edges may be added in any order relative to node creation, as
    /// long as both endpoints already exist.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        self.try_add_edge(parent, child).expect("unknown node in add_edge");
    }

    pub fn try_add_edge(&mut self, parent: NodeId, child: NodeId) -> Result<(), GraphBuildError> {
        if parent.index() >= self.nodes.len() {
            return Err(GraphBuildError::UnknownNode(parent));
        }
        if child.index() >= self.nodes.len() {
            return Err(GraphBuildError::UnknownNode(child));
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parents.push(parent);
        Ok(())
    }

    /// Looks up a previously added node by label.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.labels.get(label).copied()
    }

    pub fn set_entry(&mut self, node: NodeId) {
        self.entry = Some(node);
    }

    pub fn set_terminal(&mut self, node: NodeId) {
        self.terminal = Some(node);
    }

    pub fn build(self) -> Result<Graph, GraphBuildError> {
        let entry = self.entry.ok_or(GraphBuildError::MissingEntry)?;
        let terminal = self.terminal.ok_or(GraphBuildError::MissingTerminal)?;

        let required: Vec<u32> = self
            .nodes
            .iter()
            .map(|n| n.parents.len() as u32)
            .collect();

        if required[entry.index()] != 0 {
            return Err(GraphBuildError::EntryHasDependencies(entry));
        }

        let mut topology = Vec::with_capacity(self.nodes.len());
        let mut state = Vec::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.into_iter().enumerate() {
            topology.push(NodeTopology {
                label: node.label,
                required: required[i],
                children: node.children,
                parents: node.parents,
            });
            state.push(NodeState::new(node.task));
        }

        Ok(Graph {
            topology,
            state,
            entry,
            terminal,
        })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
