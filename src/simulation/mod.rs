use crate::circuit::{CircuitEdge, CircuitNode, NodeSnapshot};
use crate::config::{DEFAULT_EXTERNAL_MARKER, SimulationConfig};
use crate::definitions::{DefinitionRegistry, ElectricalDefinition};
use crate::error::ConfigError;
use crate::graph::{HandleGraph, PathTracer, partition_circuit};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::sync::Arc;

mod context;
mod deriver;
mod outcome;

use deriver::StateDeriver;

pub use context::TraversalContext;
pub use outcome::{FailureStage, NodeFailure, SimulationOutcome};

/// Runs reachability-based circuit simulation passes.
///
/// A `Simulator` holds no circuit state. Each call takes a full snapshot of
/// nodes and wires and hands back a snapshot, so it can be shared freely and
/// called again on the same input with the same result.
pub struct Simulator {
    registry: DefinitionRegistry,
    external_marker: String,
}

pub struct SimulatorBuilder {
    registry: DefinitionRegistry,
    external_marker: String,
}

impl Default for SimulatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: DefinitionRegistry::with_builtins(),
            external_marker: DEFAULT_EXTERNAL_MARKER.to_string(),
        }
    }

    /// Simulates nodes of `user_type_name` with the definition registered as
    /// `kairo_type_name`. Unknown target types are ignored.
    pub fn with_type_mapping(mut self, user_type_name: &str, kairo_type_name: &str) -> Self {
        if !self.registry.alias(user_type_name, kairo_type_name) {
            log::warn!(
                "Ignoring type mapping '{}' -> '{}': no such definition",
                user_type_name,
                kairo_type_name
            );
        }
        self
    }

    pub fn with_custom_definition(mut self, definition: Box<dyn ElectricalDefinition>) -> Self {
        self.registry.register(definition);
        self
    }

    /// Sets the data field that marks a node as externally driven.
    pub fn with_external_marker(mut self, marker: &str) -> Self {
        self.external_marker = marker.to_string();
        self
    }

    /// Applies a loaded config. Unlike `with_type_mapping`, a mapping onto an
    /// unknown type is an error here, since it came from a user's file.
    pub fn with_config(mut self, config: &SimulationConfig) -> Result<Self, ConfigError> {
        for (user_type, builtin_type) in &config.type_mappings {
            if !self.registry.alias(user_type, builtin_type) {
                return Err(ConfigError::UnknownBuiltin {
                    user_type: user_type.clone(),
                    builtin_type: builtin_type.clone(),
                });
            }
        }
        self.external_marker = config.external_marker.clone();
        Ok(self)
    }

    pub fn build(self) -> Simulator {
        Simulator {
            registry: self.registry,
            external_marker: self.external_marker,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// A simulator with the built-in catalog and the default marker.
    pub fn new() -> Self {
        SimulatorBuilder::new().build()
    }

    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::new()
    }

    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    pub fn external_marker(&self) -> &str {
        &self.external_marker
    }

    /// Runs one pass and returns only the resulting snapshot: `nodes` itself
    /// (same `Arc`) when nothing changed, a new snapshot otherwise.
    pub fn simulate(&self, nodes: &NodeSnapshot, edges: &[CircuitEdge]) -> NodeSnapshot {
        self.run(nodes, edges).nodes
    }

    /// Runs one full pass: partition, trace, derive, diff.
    pub fn run(&self, nodes: &NodeSnapshot, edges: &[CircuitEdge]) -> SimulationOutcome {
        let by_id: AHashMap<&str, &CircuitNode> =
            nodes.iter().map(|n| (n.id.as_str(), n.as_ref())).collect();

        let wires: Vec<&CircuitEdge> = edges
            .iter()
            .filter(|wire| self.is_live(&by_id, wire))
            .collect();
        if wires.len() < edges.len() {
            log::debug!("Ignoring {} dangling wire(s)", edges.len() - wires.len());
        }

        // 1. Partition into independent clusters
        let partitions = partition_circuit(nodes, wires.iter().copied());
        let partition_of: AHashMap<&str, usize> = partitions
            .iter()
            .enumerate()
            .flat_map(|(index, p)| p.node_ids().iter().map(move |id| (id.as_str(), index)))
            .collect();
        let mut wires_by_partition = wires
            .iter()
            .filter_map(|wire| {
                partition_of
                    .get(wire.source.as_str())
                    .map(|&index| (index, *wire))
            })
            .into_group_map();

        // 2. Trace every source inside its own partition
        let tracer = PathTracer::new(&self.registry);
        let mut completed = AHashSet::new();
        let mut failures = Vec::new();
        for (index, partition) in partitions.iter().enumerate() {
            let members: Vec<&CircuitNode> = partition
                .node_ids()
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied())
                .collect();
            let partition_wires = wires_by_partition.remove(&index).unwrap_or_default();
            let trace = tracer.trace(&members, &partition_wires);
            completed.extend(trace.completed);
            failures.extend(trace.failures);
        }

        // 3. Derive state against the whole circuit's wiring
        let wire_graph = HandleGraph::from_wires(wires.iter().copied());
        let deriver = StateDeriver::new(
            &self.registry,
            &wire_graph,
            &completed,
            &self.external_marker,
        );
        let derivation = deriver.derive(nodes);
        failures.extend(derivation.failures);

        log::debug!(
            "Simulated {} node(s) in {} partition(s): {} on completed loops, {} changed",
            nodes.len(),
            partitions.len(),
            completed.len(),
            derivation.changed.len()
        );

        let next = if derivation.changed.is_empty() {
            Arc::clone(nodes)
        } else {
            NodeSnapshot::from(derivation.nodes)
        };

        SimulationOutcome {
            nodes: next,
            changed: derivation.changed,
            completed,
            partitions,
            failures,
        }
    }

    /// A wire is live when both of its ends name an existing node and a
    /// handle that node's type actually has.
    fn is_live(&self, by_id: &AHashMap<&str, &CircuitNode>, wire: &CircuitEdge) -> bool {
        let end_is_live = |node_id: &str, handle: &str| {
            by_id
                .get(node_id)
                .is_some_and(|node| self.registry.accepts_handle(&node.node_type, handle))
        };
        end_is_live(&wire.source, &wire.source_handle)
            && end_is_live(&wire.target, &wire.target_handle)
    }
}
