//! Human-readable graph dump, generalized from the reference implementation's
//! `gnode_print`. Diagnostic output only — never consulted by the scheduler.

use std::fmt::Write as _;

use crate::graph::Graph;

impl Graph {
    /// Renders one line per node, listing its children's labels in edge
    /// order, e.g. `node A --> a b c`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for i in 0..self.node_count() {
            let node = crate::node::NodeId(i as u32);
            let children = self.children_of(node);
            write!(out, "node {} -->", self.label(node)).expect("writing to String never fails");
            for child in children {
                write!(out, " {}", self.label(*child)).expect("writing to String never fails");
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;

    #[test]
    fn describe_lists_children_per_node() {
        let mut b = GraphBuilder::new();
        let a = b.add_node("A", || {});
        let z = b.add_node("Z", || {});
        b.add_edge(a, z);
        b.set_entry(a);
        b.set_terminal(z);
        let graph = b.build().unwrap();

        let description = graph.describe();
        assert!(description.contains("node A --> Z"));
        assert!(description.contains("node Z -->\n"));
    }
}
