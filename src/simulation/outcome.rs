use crate::circuit::NodeSnapshot;
use crate::error::DefinitionError;
use crate::graph::Partition;
use ahash::AHashSet;
use std::fmt;

/// Which definition operation failed for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    InternalEdges,
    DeriveState,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureStage::InternalEdges => write!(f, "internal edges"),
            FailureStage::DeriveState => write!(f, "derive state"),
        }
    }
}

/// A definition error isolated to one node during a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFailure {
    pub node_id: String,
    pub node_type: String,
    pub stage: FailureStage,
    pub error: DefinitionError,
}

/// The full result of one simulation pass.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// The input snapshot itself when nothing changed, a new one otherwise.
    pub nodes: NodeSnapshot,
    /// Ids of the nodes whose data changed, in snapshot order.
    pub changed: Vec<String>,
    /// Every node id sitting on a completed loop.
    pub completed: AHashSet<String>,
    pub partitions: Vec<Partition>,
    pub failures: Vec<NodeFailure>,
}

impl SimulationOutcome {
    pub fn is_changed(&self) -> bool {
        !self.changed.is_empty()
    }
}
