use super::fields::patch_of;
use super::{ElectricalDefinition, InternalEdge};
use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::simulation::TraversalContext;
use itertools::iproduct;
use serde_json::Value;

/// Power rails of a microcontroller board.
#[derive(Debug, Clone, Copy)]
pub struct BoardRails {
    /// The input rail feeding the on-board regulator.
    pub primary: &'static str,
    /// Regulated outputs.
    pub secondary: &'static [&'static str],
    pub grounds: &'static [&'static str],
}

/// A microcontroller board modelled as a regulator DAG: the primary rail feeds
/// every secondary rail and every ground, and each secondary rail feeds every
/// ground, so a loop closes whichever rail and ground the user wired.
///
/// The board counts as powered only when it sits on a completed loop, its
/// primary rail is wired and at least one ground is wired.
pub struct BoardDefinition {
    node_type: &'static str,
    rails: BoardRails,
    io_pins: Vec<String>,
}

impl BoardDefinition {
    pub fn new(node_type: &'static str, rails: BoardRails, io_pins: Vec<String>) -> Self {
        Self {
            node_type,
            rails,
            io_pins,
        }
    }

    pub fn arduino_uno() -> Self {
        let pins = numbered("d", 14).chain(numbered("a", 6)).collect();
        Self::new(
            "arduinoUno",
            BoardRails {
                primary: "vin",
                secondary: &["5v", "3v3"],
                grounds: &["gnd1", "gnd2", "gnd3"],
            },
            pins,
        )
    }

    pub fn arduino_nano() -> Self {
        let pins = numbered("d", 14).chain(numbered("a", 8)).collect();
        Self::new(
            "arduinoNano",
            BoardRails {
                primary: "vin",
                secondary: &["5v", "3v3"],
                grounds: &["gnd1", "gnd2"],
            },
            pins,
        )
    }

    pub fn esp32() -> Self {
        Self::new(
            "esp32",
            BoardRails {
                primary: "vin",
                secondary: &["3v3"],
                grounds: &["gnd1", "gnd2"],
            },
            numbered("gpio", 40).collect(),
        )
    }
}

fn numbered(prefix: &str, count: usize) -> impl Iterator<Item = String> + '_ {
    (0..count).map(move |i| format!("{prefix}{i}"))
}

impl ElectricalDefinition for BoardDefinition {
    fn node_type(&self) -> &str {
        self.node_type
    }

    fn has_handle(&self, handle: &str) -> bool {
        let rails = &self.rails;
        handle == rails.primary
            || rails.secondary.contains(&handle)
            || rails.grounds.contains(&handle)
            || self.io_pins.iter().any(|p| p == handle)
    }

    fn internal_edges(
        &self,
        node_id: &str,
        _data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError> {
        let rails = &self.rails;
        let from_primary = rails
            .secondary
            .iter()
            .chain(rails.grounds)
            .map(|to| InternalEdge::within(node_id, rails.primary, to));
        let from_secondary = iproduct!(rails.secondary, rails.grounds)
            .map(|(from, to)| InternalEdge::within(node_id, from, to));

        Ok(from_primary.chain(from_secondary).collect())
    }

    fn derive_state(
        &self,
        context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError> {
        let powered = context.in_completed_circuit()
            && context.is_wired(self.rails.primary)
            && self.rails.grounds.iter().any(|g| context.is_wired(g));
        Ok(Some(patch_of([("isPowered", Value::Bool(powered))])))
    }
}
