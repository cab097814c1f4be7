use super::context::TraversalContext;
use super::outcome::{FailureStage, NodeFailure};
use crate::circuit::CircuitNode;
use crate::definitions::DefinitionRegistry;
use crate::graph::HandleGraph;
use ahash::AHashSet;
use std::sync::Arc;

/// Applies every node's derived state on top of the current snapshot.
pub(super) struct StateDeriver<'a> {
    registry: &'a DefinitionRegistry,
    wire_graph: &'a HandleGraph,
    completed: &'a AHashSet<String>,
    external_marker: &'a str,
}

/// Nodes after derivation, plus what changed and what failed.
pub(super) struct Derivation {
    pub nodes: Vec<Arc<CircuitNode>>,
    pub changed: Vec<String>,
    pub failures: Vec<NodeFailure>,
}

impl<'a> StateDeriver<'a> {
    pub(super) fn new(
        registry: &'a DefinitionRegistry,
        wire_graph: &'a HandleGraph,
        completed: &'a AHashSet<String>,
        external_marker: &'a str,
    ) -> Self {
        Self {
            registry,
            wire_graph,
            completed,
            external_marker,
        }
    }

    pub(super) fn derive(&self, nodes: &[Arc<CircuitNode>]) -> Derivation {
        let mut derivation = Derivation {
            nodes: Vec::with_capacity(nodes.len()),
            changed: Vec::new(),
            failures: Vec::new(),
        };

        for node in nodes {
            let next = self.derive_node(node, &mut derivation.failures);
            if !Arc::ptr_eq(&next, node) {
                derivation.changed.push(node.id.clone());
            }
            derivation.nodes.push(next);
        }

        derivation
    }

    /// Returns `node` itself unless its derived state differs from its data.
    fn derive_node(
        &self,
        node: &Arc<CircuitNode>,
        failures: &mut Vec<NodeFailure>,
    ) -> Arc<CircuitNode> {
        // Externally driven data is authoritative.
        if node.flag(self.external_marker) {
            return Arc::clone(node);
        }
        let Some(definition) = self.registry.get(&node.node_type) else {
            return Arc::clone(node);
        };

        let context =
            TraversalContext::new(&node.id, &node.data, self.wire_graph, self.completed);
        match definition.derive_state(&context) {
            Ok(Some(patch)) if !node.is_patch_noop(&patch) => Arc::new(node.patched(&patch)),
            Ok(_) => Arc::clone(node),
            Err(error) => {
                log::warn!(
                    "Keeping prior state of node '{}' ({}): {}",
                    node.id,
                    node.node_type,
                    error
                );
                failures.push(NodeFailure {
                    node_id: node.id.clone(),
                    node_type: node.node_type.clone(),
                    stage: FailureStage::DeriveState,
                    error,
                });
                Arc::clone(node)
            }
        }
    }
}
