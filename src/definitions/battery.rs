use super::{ElectricalDefinition, InternalEdge, SourceTerminals};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;

/// The power source every loop is traced from. Never a pass-through: it
/// exposes no internal edges and owns its own data (e.g. `voltage`).
pub struct BatteryDefinition;

impl ElectricalDefinition for BatteryDefinition {
    fn node_type(&self) -> &str {
        "battery"
    }

    fn has_handle(&self, handle: &str) -> bool {
        matches!(handle, "plus" | "minus")
    }

    fn source_terminals(&self) -> Option<SourceTerminals> {
        Some(SourceTerminals {
            positive: "plus",
            negative: "minus",
        })
    }

    fn internal_edges(
        &self,
        _node_id: &str,
        _data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        Ok(Vec::new())
    }

    fn derive_state(
        &self,
        _context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        Ok(None)
    }
}
