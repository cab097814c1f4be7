use super::fields::patch_of;
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;
use serde_json::{Map, Value};

const SEGMENTS: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "dp"];

/// Lit `a`..`g` segments for each decimal digit.
const DIGIT_PATTERNS: [(u8, &str); 10] = [
    (0, "abcdef"),
    (1, "bc"),
    (2, "abdeg"),
    (3, "abcdg"),
    (4, "bcfg"),
    (5, "acdfg"),
    (6, "acdefg"),
    (7, "abc"),
    (8, "abcdefg"),
    (9, "abcdfg"),
];

/// A common-cathode seven-segment display.
pub struct SevenSegmentDefinition;

impl ElectricalDefinition for SevenSegmentDefinition {
    fn node_type(&self) -> &str {
        "sevenSegment"
    }

    fn has_handle(&self, handle: &str) -> bool {
        handle == "common" || SEGMENTS.contains(&handle)
    }

    fn internal_edges(
        &self,
        node_id: &str,
        _data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        Ok(SEGMENTS
            .iter()
            .map(|segment| InternalEdge::within(node_id, segment, "common"))
            .collect())
    }

    fn derive_state(
        &self,
        context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        let powered = context.in_completed_circuit()
            && context.is_wired("common")
            && SEGMENTS.iter().any(|s| context.is_wired(s));
        let lit: Vec<&str> = SEGMENTS
            .into_iter()
            .filter(|segment| powered && context.is_wired(segment))
            .collect();

        let segments: Map<String, Value> = SEGMENTS
            .iter()
            .map(|s| (s.to_string(), Value::Bool(lit.contains(s))))
            .collect();

        let digit = decode_digit(&lit).map_or(Value::Null, Value::from);

        Ok(Some(patch_of([
            ("isPowered", Value::Bool(powered)),
            ("segments", Value::Object(segments)),
            ("digit", digit),
        ])))
    }
}

/// Maps the lit segments (decimal point ignored) to the digit they draw.
fn decode_digit(lit: &[&str]) -> Option<u8> {
    let pattern: String = lit.iter().filter(|s| **s != "dp").copied().collect();
    DIGIT_PATTERNS
        .iter()
        .find(|(_, p)| *p == pattern)
        .map(|(digit, _)| *digit)
}
