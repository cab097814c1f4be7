use super::fields::read_bool;
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;

/// A push button. Open it conducts nothing; closed it conducts both ways
/// between `in` and `out`. `isClosed` is owned by the user.
pub struct ButtonDefinition;

impl ElectricalDefinition for ButtonDefinition {
    fn node_type(&self) -> &str {
        "button"
    }

    fn has_handle(&self, handle: &str) -> bool {
        matches!(handle, "in" | "out")
    }

    fn toggle_field(&self) -> Option<&'static str> {
        Some("isClosed")
    }

    fn internal_edges(
        &self,
        node_id: &str,
        data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        if !read_bool(node_id, data, "isClosed")? {
            return Ok(Vec::new());
        }
        Ok(vec![
            InternalEdge::within(node_id, "in", "out"),
            InternalEdge::within(node_id, "out", "in"),
        ])
    }

    fn derive_state(
        &self,
        _context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        Ok(None)
    }
}
