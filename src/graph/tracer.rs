use super::{HandleGraph, HandleKey};
use crate::circuit::{CircuitEdge, CircuitNode};
use crate::definitions::{DefinitionRegistry, SourceTerminals};
use crate::simulation::{FailureStage, NodeFailure};
use ahash::AHashSet;
use std::collections::VecDeque;

/// What tracing one partition produced.
#[derive(Debug, Clone, Default)]
pub struct PartitionTrace {
    /// Ids of every node sitting on at least one completed loop.
    pub completed: AHashSet<String>,
    /// Definitions whose internal edges could not be generated.
    pub failures: Vec<NodeFailure>,
}

/// Finds every node that lies on a loop from a power source's positive
/// terminal back to that same source's negative terminal.
pub struct PathTracer<'a> {
    registry: &'a DefinitionRegistry,
}

impl<'a> PathTracer<'a> {
    pub fn new(registry: &'a DefinitionRegistry) -> Self {
        Self { registry }
    }

    /// Traces a single partition. `wires` must already be restricted to the
    /// partition and free of dangling references.
    pub fn trace(&self, nodes: &[&CircuitNode], wires: &[&CircuitEdge]) -> PartitionTrace {
        let mut trace = PartitionTrace::default();
        let graph = self.build_graph(nodes, wires, &mut trace.failures);

        for node in nodes {
            let Some(terminals) = self
                .registry
                .get(&node.node_type)
                .and_then(|d| d.source_terminals())
            else {
                continue;
            };
            let loop_nodes = trace_source(&graph, &node.id, terminals);
            trace.completed.extend(loop_nodes);
        }

        trace
    }

    /// Builds the directed handle graph: every wire both ways, plus the
    /// internal edges each definition declares for the node's current data.
    fn build_graph(
        &self,
        nodes: &[&CircuitNode],
        wires: &[&CircuitEdge],
        failures: &mut Vec<NodeFailure>,
    ) -> HandleGraph {
        let mut graph = HandleGraph::from_wires(wires.iter().copied());

        for node in nodes {
            let Some(definition) = self.registry.get(&node.node_type) else {
                continue;
            };
            match definition.internal_edges(&node.id, &node.data) {
                Ok(edges) => {
                    for edge in edges {
                        graph.add_edge(edge.from, edge.to);
                    }
                }
                Err(error) => {
                    log::warn!(
                        "Skipping internal edges of node '{}' ({}): {}",
                        node.id,
                        node.node_type,
                        error
                    );
                    failures.push(NodeFailure {
                        node_id: node.id.clone(),
                        node_type: node.node_type.clone(),
                        stage: FailureStage::InternalEdges,
                        error,
                    });
                }
            }
        }

        graph
    }
}

/// Breadth-first search from `source_id`'s positive terminal.
///
/// Each queue entry carries the distinct node ids crossed so far. An entry
/// that reaches the same source's negative terminal contributes its whole
/// path; the queue keeps draining so parallel loops are found too. A handle
/// is expanded at most once, which bounds the search on cyclic wiring.
pub(crate) fn trace_source(
    graph: &HandleGraph,
    source_id: &str,
    terminals: SourceTerminals,
) -> AHashSet<String> {
    let start = HandleKey::new(source_id, terminals.positive);
    let mut completed = AHashSet::new();
    let mut visited: AHashSet<HandleKey> = AHashSet::new();
    let mut queue: VecDeque<(HandleKey, Vec<String>)> = VecDeque::new();
    queue.push_back((start, vec![source_id.to_string()]));

    while let Some((current, path)) = queue.pop_front() {
        if current.is(source_id, terminals.negative) {
            log::trace!("Completed loop through source '{}': {:?}", source_id, path);
            completed.extend(path);
            continue;
        }
        if !visited.insert(current.clone()) {
            continue;
        }

        for next in graph.neighbors(&current) {
            if visited.contains(next) {
                continue;
            }
            let mut next_path = path.clone();
            if next.node_id != current.node_id && !next_path.contains(&next.node_id) {
                next_path.push(next.node_id.clone());
            }
            queue.push_back((next.clone(), next_path));
        }
    }

    completed
}
