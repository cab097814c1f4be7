use super::fields::patch_of;
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;
use serde_json::Value;

/// Defines unidirectional two-terminal components: a single internal edge from
/// the positive to the negative terminal, and one boolean field set when the
/// node sits on a completed loop with both terminals wired. Extra handles are
/// accepted for wiring but do not conduct.
macro_rules! define_two_terminal_definitions {
    ( $( ($struct_name:ident, $node_type:expr, $positive:expr => $negative:expr, [$($extra:expr),*], $flag:expr) ),* $(,)? ) => {
        $(
            pub struct $struct_name;

            impl ElectricalDefinition for $struct_name {
                fn node_type(&self) -> &str { $node_type }

                fn has_handle(&self, handle: &str) -> bool {
                    handle == $positive || handle == $negative $( || handle == $extra )*
                }

                fn internal_edges(&self, node_id: &str, _data: &NodeData) -> Result<Vec<InternalEdge>, DefinitionError> {
                    Ok(vec![InternalEdge::within(node_id, $positive, $negative)])
                }

                fn derive_state(&self, context: &TraversalContext<'_>) -> Result<Option<DataPatch>, DefinitionError> {
                    let active = context.in_completed_circuit()
                        && context.is_wired($positive)
                        && context.is_wired($negative);
                    Ok(Some(patch_of([($flag, Value::Bool(active))])))
                }
            }
        )*
    };
}

define_two_terminal_definitions! {
    (LedDefinition, "led", "anode" => "cathode", [], "isPowered"),
    (BuzzerDefinition, "buzzer", "positive" => "negative", [], "isActive"),
    (LcdDefinition, "lcd", "vcc" => "gnd", ["sda", "scl"], "isPowered"),
    // The angle is written by whatever drives the signal pin.
    (ServoDefinition, "servo", "vcc" => "gnd", ["signal"], "isPowered"),
}
