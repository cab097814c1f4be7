use super::fields::{patch_of, read_str};
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;
use serde_json::Value;

const NEUTRAL_DIRECTION: &str = "none";
const DEFAULT_DIRECTION: &str = "clockwise";

/// A DC motor. Spins while on a completed loop; its `direction` is forced to
/// the neutral value whenever it stops.
pub struct MotorDefinition;

impl ElectricalDefinition for MotorDefinition {
    fn node_type(&self) -> &str {
        "motor"
    }

    fn has_handle(&self, handle: &str) -> bool {
        matches!(handle, "positive" | "negative")
    }

    fn internal_edges(
        &self,
        node_id: &str,
        _data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        Ok(vec![InternalEdge::within(node_id, "positive", "negative")])
    }

    fn derive_state(
        &self,
        context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        let running = context.in_completed_circuit()
            && context.is_wired("positive")
            && context.is_wired("negative");
        let current = read_str(context.node_id, context.data, "direction")?;

        let direction = match current {
            _ if !running => NEUTRAL_DIRECTION,
            Some(d) if d != NEUTRAL_DIRECTION => d,
            _ => DEFAULT_DIRECTION,
        };

        Ok(Some(patch_of([
            ("isRunning", Value::Bool(running)),
            ("direction", Value::from(direction)),
        ])))
    }
}
