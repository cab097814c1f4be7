//! A circuit editing session.
//!
//! `CircuitSession` plays the role of the editor's store: it owns the current
//! snapshot and re-runs the simulation after every structurally relevant
//! mutation (nodes, wires, data edits, user toggles), but not after cosmetic
//! ones such as moving a node.

use crate::circuit::{Circuit, CircuitEdge, CircuitNode, DataPatch, NodeSnapshot};
use crate::error::{DocumentError, SessionError};
use crate::simulation::{NodeFailure, Simulator};
use serde_json::Value;
use std::sync::Arc;

pub struct CircuitSession {
    simulator: Simulator,
    circuit: Circuit,
    last_failures: Vec<NodeFailure>,
}

impl CircuitSession {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            simulator,
            circuit: Circuit::default(),
            last_failures: Vec::new(),
        }
    }

    /// Starts a session from an existing circuit, simulating it right away.
    pub fn with_circuit(simulator: Simulator, circuit: Circuit) -> Self {
        let mut session = Self {
            simulator,
            circuit,
            last_failures: Vec::new(),
        };
        session.resimulate();
        session
    }

    /// Replaces the circuit with a freshly parsed document and simulates it.
    pub fn load_json(&mut self, json: &str) -> Result<bool, DocumentError> {
        self.circuit = Circuit::from_json(json)?;
        Ok(self.resimulate())
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        self.circuit.to_json()
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn nodes(&self) -> &NodeSnapshot {
        &self.circuit.nodes
    }

    pub fn edges(&self) -> &[CircuitEdge] {
        &self.circuit.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Arc<CircuitNode>> {
        self.circuit.node(node_id)
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// Definition failures recorded by the most recent pass.
    pub fn last_failures(&self) -> &[NodeFailure] {
        &self.last_failures
    }

    pub fn add_node(&mut self, node: CircuitNode) -> Result<bool, SessionError> {
        if self.circuit.node(&node.id).is_some() {
            return Err(SessionError::DuplicateNode(node.id));
        }
        let mut nodes = self.circuit.nodes.to_vec();
        nodes.push(Arc::new(node));
        self.circuit.nodes = nodes.into();
        Ok(self.resimulate())
    }

    /// Removes a node together with every wire attached to it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<bool, SessionError> {
        self.require_node(node_id)?;
        self.circuit.nodes = self
            .circuit
            .nodes
            .iter()
            .filter(|n| n.id != node_id)
            .cloned()
            .collect();
        self.circuit.edges.retain(|e| !e.touches(node_id));
        Ok(self.resimulate())
    }

    pub fn add_edge(&mut self, edge: CircuitEdge) -> Result<bool, SessionError> {
        if self.circuit.edge(&edge.id).is_some() {
            return Err(SessionError::DuplicateEdge(edge.id));
        }
        self.require_node(&edge.source)?;
        self.require_node(&edge.target)?;
        self.circuit.edges.push(edge);
        Ok(self.resimulate())
    }

    /// Wires two handles together under a generated edge id. The id gets a
    /// numeric suffix when another wire already uses it.
    pub fn connect(
        &mut self,
        source: (&str, &str),
        target: (&str, &str),
    ) -> Result<bool, SessionError> {
        let base = format!("{}-{}-{}-{}", source.0, source.1, target.0, target.1);
        let mut id = base.clone();
        let mut suffix = 2;
        while self.circuit.edge(&id).is_some() {
            id = format!("{base}-{suffix}");
            suffix += 1;
        }
        self.add_edge(CircuitEdge::new(id, source, target))
    }

    pub fn remove_edge(&mut self, edge_id: &str) -> Result<bool, SessionError> {
        if self.circuit.edge(edge_id).is_none() {
            return Err(SessionError::EdgeNotFound(edge_id.to_string()));
        }
        self.circuit.edges.retain(|e| e.id != edge_id);
        Ok(self.resimulate())
    }

    /// Shallow-merges `patch` into a node's data.
    pub fn update_node_data(
        &mut self,
        node_id: &str,
        patch: &DataPatch,
    ) -> Result<bool, SessionError> {
        self.replace_node(node_id, |node| node.patched(patch))?;
        Ok(self.resimulate())
    }

    /// Flips the user-owned toggle field (e.g. a button's `isClosed`).
    pub fn toggle_switch(&mut self, node_id: &str) -> Result<bool, SessionError> {
        let node = self.require_node(node_id)?;
        let field = self
            .simulator
            .registry()
            .get(&node.node_type)
            .and_then(|d| d.toggle_field())
            .ok_or_else(|| SessionError::NotToggleable {
                node_id: node.id.clone(),
                type_name: node.node_type.clone(),
            })?;

        let mut patch = DataPatch::new();
        patch.insert(field.to_string(), Value::Bool(!node.flag(field)));
        self.update_node_data(node_id, &patch)
    }

    /// Moves a node on the canvas. Cosmetic: no simulation pass runs.
    pub fn move_node(&mut self, node_id: &str, x: f64, y: f64) -> Result<(), SessionError> {
        self.replace_node(node_id, |node| node.clone().at(x, y))
    }

    /// Entry point for an external driver (e.g. a running microcontroller
    /// program): merges pin-derived values into a node and marks it as
    /// externally driven so simulation passes leave its data alone.
    pub fn drive_external(
        &mut self,
        node_id: &str,
        values: &DataPatch,
    ) -> Result<bool, SessionError> {
        let mut patch = values.clone();
        patch.insert(
            self.simulator.external_marker().to_string(),
            Value::Bool(true),
        );
        self.update_node_data(node_id, &patch)
    }

    /// Hands a node back to the simulation.
    pub fn release_external(&mut self, node_id: &str) -> Result<bool, SessionError> {
        let marker = self.simulator.external_marker().to_string();
        self.replace_node(node_id, |node| {
            let mut next = node.clone();
            next.data.remove(&marker);
            next
        })?;
        Ok(self.resimulate())
    }

    /// Runs a pass over the current snapshot and commits the result.
    /// Returns `true` if the pass changed any node.
    pub fn resimulate(&mut self) -> bool {
        let outcome = self.simulator.run(&self.circuit.nodes, &self.circuit.edges);
        let changed = outcome.is_changed();
        self.circuit.nodes = outcome.nodes;
        self.last_failures = outcome.failures;
        changed
    }

    fn require_node(&self, node_id: &str) -> Result<&Arc<CircuitNode>, SessionError> {
        self.circuit
            .node(node_id)
            .ok_or_else(|| SessionError::NodeNotFound(node_id.to_string()))
    }

    fn replace_node(
        &mut self,
        node_id: &str,
        update: impl FnOnce(&CircuitNode) -> CircuitNode,
    ) -> Result<(), SessionError> {
        let index = self
            .circuit
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| SessionError::NodeNotFound(node_id.to_string()))?;

        let mut nodes = self.circuit.nodes.to_vec();
        let next = Arc::new(update(nodes[index].as_ref()));
        nodes[index] = next;
        self.circuit.nodes = nodes.into();
        Ok(())
    }
}
