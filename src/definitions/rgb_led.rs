use super::fields::patch_of;
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;
use serde_json::Value;

const CHANNELS: [&str; 3] = ["red", "green", "blue"];
const FULL_CHANNEL: u8 = 255;

/// A common-cathode RGB LED: each colour leg conducts into `common`.
pub struct RgbLedDefinition;

impl ElectricalDefinition for RgbLedDefinition {
    fn node_type(&self) -> &str {
        "rgbLed"
    }

    fn has_handle(&self, handle: &str) -> bool {
        handle == "common" || CHANNELS.contains(&handle)
    }

    fn internal_edges(
        &self,
        node_id: &str,
        _data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        Ok(CHANNELS
            .iter()
            .map(|channel| InternalEdge::within(node_id, channel, "common"))
            .collect())
    }

    /// The LED is powered when it is on a completed loop with `common` and at
    /// least one colour leg wired. A colour shows at full intensity when the
    /// LED is powered and that colour's leg is wired.
    fn derive_state(
        &self,
        context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        let powered = context.in_completed_circuit()
            && context.is_wired("common")
            && CHANNELS.iter().any(|c| context.is_wired(c));
        let mut patch = patch_of([("isPowered", Value::Bool(powered))]);
        for channel in CHANNELS {
            let level = if powered && context.is_wired(channel) {
                FULL_CHANNEL
            } else {
                0
            };
            patch.insert(channel.to_string(), Value::from(level));
        }
        Ok(Some(patch))
    }
}
