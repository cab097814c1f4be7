use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Type-specific attributes of a node. Opaque to the engine except for the
/// fields a component's own electrical definition reads or writes.
pub type NodeData = serde_json::Map<String, Value>;

/// A partial update to a node's data, as produced by a derive function or an
/// external driver.
pub type DataPatch = serde_json::Map<String, Value>;

/// An immutable snapshot of every node in a circuit.
///
/// The simulator hands back the very same `Arc` when a pass changes nothing,
/// and nodes that did not change keep their own `Arc` identity inside a new
/// snapshot, so consumers can skip work with `Arc::ptr_eq`.
pub type NodeSnapshot = Arc<[Arc<CircuitNode>]>;

/// Canvas coordinates of a node. Purely cosmetic for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// A component placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

impl CircuitNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            position: Position::default(),
            data: NodeData::new(),
        }
    }

    /// Builder-style helper to seed a data field.
    pub fn with_data(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.data.insert(field.to_string(), value.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Reads a boolean field, treating anything other than `true` as `false`.
    pub fn flag(&self, field: &str) -> bool {
        matches!(self.data.get(field), Some(Value::Bool(true)))
    }

    /// Returns `true` if merging `patch` would leave every field as it is.
    pub fn is_patch_noop(&self, patch: &DataPatch) -> bool {
        patch
            .iter()
            .all(|(field, value)| self.data.get(field) == Some(value))
    }

    /// Returns a copy of this node with `patch` shallow-merged into its data.
    pub fn patched(&self, patch: &DataPatch) -> Self {
        let mut next = self.clone();
        for (field, value) in patch {
            next.data.insert(field.clone(), value.clone());
        }
        next
    }
}

/// A user-drawn wire between two named terminals ("handles") on two nodes.
///
/// Wires carry no polarity: `source`/`target` only record the drag direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitEdge {
    pub id: String,
    pub source: String,
    pub source_handle: String,
    pub target: String,
    pub target_handle: String,
}

impl CircuitEdge {
    pub fn new(
        id: impl Into<String>,
        (source, source_handle): (&str, &str),
        (target, target_handle): (&str, &str),
    ) -> Self {
        Self {
            id: id.into(),
            source: source.to_string(),
            source_handle: source_handle.to_string(),
            target: target.to_string(),
            target_handle: target_handle.to_string(),
        }
    }

    /// Returns `true` if either end of the wire sits on `node_id`.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The complete circuit: every node snapshot plus every wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circuit {
    pub nodes: NodeSnapshot,
    #[serde(default)]
    pub edges: Vec<CircuitEdge>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self {
            nodes: Arc::from(Vec::new()),
            edges: Vec::new(),
        }
    }
}

impl Circuit {
    pub fn new(nodes: Vec<CircuitNode>, edges: Vec<CircuitEdge>) -> Self {
        Self {
            nodes: snapshot_of(nodes),
            edges,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&Arc<CircuitNode>> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&CircuitEdge> {
        self.edges.iter().find(|e| e.id == edge_id)
    }
}

/// Wraps freshly built nodes into a snapshot.
pub fn snapshot_of(nodes: Vec<CircuitNode>) -> NodeSnapshot {
    nodes.into_iter().map(Arc::new).collect()
}
