//! Handle-level connectivity graphs and the two graph passes of a simulation:
//! partitioning the circuit into independent clusters and tracing completed
//! loops inside each of them.

use crate::circuit::CircuitEdge;
use ahash::AHashMap;
use std::fmt;

pub mod partition;
pub mod tracer;

pub use partition::{Partition, partition_circuit};
pub use tracer::{PartitionTrace, PathTracer};

/// Identity of a terminal in the connectivity graph: a `(node, handle)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleKey {
    pub node_id: String,
    pub handle_id: String,
}

impl HandleKey {
    pub fn new(node_id: &str, handle_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            handle_id: handle_id.to_string(),
        }
    }

    pub fn is(&self, node_id: &str, handle_id: &str) -> bool {
        self.node_id == node_id && self.handle_id == handle_id
    }
}

/// The serialized string form, e.g. `led1:anode`.
impl fmt::Display for HandleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_id, self.handle_id)
    }
}

/// A directed adjacency list over handles.
///
/// Wires are folded in as two opposite directed edges; internal edges are
/// added exactly as their definition declares them.
#[derive(Debug, Clone, Default)]
pub struct HandleGraph {
    adjacency: AHashMap<HandleKey, Vec<HandleKey>>,
}

impl HandleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph holding only the given wires.
    pub fn from_wires<'a>(wires: impl IntoIterator<Item = &'a CircuitEdge>) -> Self {
        let mut graph = Self::new();
        for wire in wires {
            graph.add_wire(wire);
        }
        graph
    }

    pub fn add_edge(&mut self, from: HandleKey, to: HandleKey) {
        let targets = self.adjacency.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    pub fn add_wire(&mut self, wire: &CircuitEdge) {
        let source = HandleKey::new(&wire.source, &wire.source_handle);
        let target = HandleKey::new(&wire.target, &wire.target_handle);
        self.add_edge(source.clone(), target.clone());
        self.add_edge(target, source);
    }

    pub fn neighbors(&self, handle: &HandleKey) -> &[HandleKey] {
        self.adjacency
            .get(handle)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of outgoing edges leaving `(node_id, handle_id)`.
    pub fn degree(&self, node_id: &str, handle_id: &str) -> usize {
        self.neighbors(&HandleKey::new(node_id, handle_id)).len()
    }

    /// Returns `true` if the handle has at least one connection.
    pub fn is_connected(&self, node_id: &str, handle_id: &str) -> bool {
        self.degree(node_id, handle_id) > 0
    }

    /// Number of handles with at least one outgoing edge.
    pub fn handle_count(&self) -> usize {
        self.adjacency.len()
    }
}
