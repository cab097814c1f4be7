//! Common test utilities for building circuits.
use kairo::prelude::*;
use std::sync::Arc;

/// Shorthand for a wire between two handles.
#[allow(dead_code)]
pub fn wire(id: &str, source: (&str, &str), target: (&str, &str)) -> CircuitEdge {
    CircuitEdge::new(id, source, target)
}

/// The reference series circuit.
///
/// Logic: `battery.plus -> button.in`, `button.out -> led.anode`,
/// `led.cathode -> battery.minus`.
#[allow(dead_code)]
pub fn create_series_circuit(button_closed: bool) -> Circuit {
    Circuit::new(
        vec![
            CircuitNode::new("battery", "battery").with_data("voltage", 9),
            CircuitNode::new("button", "button").with_data("isClosed", button_closed),
            CircuitNode::new("led", "led"),
        ],
        vec![
            wire("wireA", ("battery", "plus"), ("button", "in")),
            wire("wireB", ("button", "out"), ("led", "anode")),
            wire("wireC", ("led", "cathode"), ("battery", "minus")),
        ],
    )
}

/// A battery driving a single two-terminal load directly.
#[allow(dead_code)]
pub fn create_simple_loop(
    battery_id: &str,
    load_id: &str,
    load_type: &str,
    (positive, negative): (&str, &str),
) -> (Vec<CircuitNode>, Vec<CircuitEdge>) {
    (
        vec![
            CircuitNode::new(battery_id, "battery"),
            CircuitNode::new(load_id, load_type),
        ],
        vec![
            wire(
                &format!("{battery_id}-out"),
                (battery_id, "plus"),
                (load_id, positive),
            ),
            wire(
                &format!("{battery_id}-in"),
                (load_id, negative),
                (battery_id, "minus"),
            ),
        ],
    )
}

/// Finds a node in a snapshot, panicking with a readable message if absent.
#[allow(dead_code)]
pub fn find<'a>(nodes: &'a NodeSnapshot, node_id: &str) -> &'a Arc<CircuitNode> {
    nodes
        .iter()
        .find(|n| n.id == node_id)
        .unwrap_or_else(|| panic!("node '{node_id}' missing from snapshot"))
}

/// Reads a boolean field of a node in a snapshot.
#[allow(dead_code)]
pub fn flag(nodes: &NodeSnapshot, node_id: &str, field: &str) -> bool {
    find(nodes, node_id).flag(field)
}

/// Builds a single-field data patch.
#[allow(dead_code)]
pub fn patch(field: &str, value: impl Into<serde_json::Value>) -> DataPatch {
    let mut patch = DataPatch::new();
    patch.insert(field.to_string(), value.into());
    patch
}
