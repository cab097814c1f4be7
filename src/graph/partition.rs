use crate::circuit::{CircuitEdge, CircuitNode};
use ahash::{AHashMap, AHashSet};
use std::sync::Arc;

/// A maximal set of nodes connected by user wires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    node_ids: Vec<String>,
    members: AHashSet<String>,
}

impl Partition {
    fn from_ids(node_ids: Vec<String>) -> Self {
        let members = node_ids.iter().cloned().collect();
        Self { node_ids, members }
    }

    /// Member ids in depth-first discovery order.
    pub fn node_ids(&self) -> &[String] {
        &self.node_ids
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.members.contains(node_id)
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}

/// Splits the circuit into independent clusters.
///
/// Partitioning is node-level and undirected: two nodes share a partition iff
/// a chain of wires joins them, whatever handles the wires use. Every node
/// lands in exactly one partition (isolated nodes become singletons). Wires
/// naming a node that is not in `nodes` are ignored. Partitions are returned
/// in the order their first member appears in `nodes`.
pub fn partition_circuit<'e>(
    nodes: &[Arc<CircuitNode>],
    edges: impl IntoIterator<Item = &'e CircuitEdge>,
) -> Vec<Partition> {
    let known: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    let mut neighbors: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if !known.contains(source) || !known.contains(target) {
            continue;
        }
        neighbors.entry(source).or_default().push(target);
        neighbors.entry(target).or_default().push(source);
    }

    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut partitions = Vec::new();

    for node in nodes {
        let root = node.id.as_str();
        if !seen.insert(root) {
            continue;
        }

        let mut cluster = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            cluster.push(current.to_string());
            for &next in neighbors.get(current).into_iter().flatten() {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        partitions.push(Partition::from_ids(cluster));
    }

    partitions
}
