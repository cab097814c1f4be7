use crate::circuit::NodeData;
use crate::graph::HandleGraph;
use ahash::AHashSet;

/// Read-only view handed to a definition's `derive_state`.
///
/// `graph` holds the user wires of the whole circuit (both directions, no
/// internal edges), so `is_wired` answers "did the user connect this
/// terminal to anything". `completed` holds every node id found on a
/// completed loop in any partition.
#[derive(Debug, Clone, Copy)]
pub struct TraversalContext<'a> {
    pub node_id: &'a str,
    pub data: &'a NodeData,
    pub graph: &'a HandleGraph,
    pub completed: &'a AHashSet<String>,
}

impl<'a> TraversalContext<'a> {
    pub fn new(
        node_id: &'a str,
        data: &'a NodeData,
        graph: &'a HandleGraph,
        completed: &'a AHashSet<String>,
    ) -> Self {
        Self {
            node_id,
            data,
            graph,
            completed,
        }
    }

    /// Returns `true` if this node lies on at least one completed loop.
    pub fn in_completed_circuit(&self) -> bool {
        self.completed.contains(self.node_id)
    }

    /// Returns `true` if one of this node's handles has at least one wire.
    pub fn is_wired(&self, handle: &str) -> bool {
        self.graph.is_connected(self.node_id, handle)
    }
}
