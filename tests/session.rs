//! Editor-style mutations through a `CircuitSession`.
mod common;
use common::*;
use kairo::prelude::*;
use std::sync::Arc;

fn series_session(button_closed: bool) -> CircuitSession {
    CircuitSession::with_circuit(Simulator::new(), create_series_circuit(button_closed))
}

#[test]
fn test_session_simulates_on_load() {
    let session = series_session(true);
    assert!(flag(session.nodes(), "led", "isPowered"));
}

#[test]
fn test_toggle_switch_round_trip() {
    let mut session = series_session(true);

    assert!(session.toggle_switch("button").unwrap());
    assert!(!session.node("button").unwrap().flag("isClosed"));
    assert!(!flag(session.nodes(), "led", "isPowered"));

    assert!(session.toggle_switch("button").unwrap());
    assert!(flag(session.nodes(), "led", "isPowered"));
}

#[test]
fn test_toggle_rejects_non_switches() {
    let mut session = series_session(true);

    assert_eq!(
        session.toggle_switch("led"),
        Err(SessionError::NotToggleable {
            node_id: "led".to_string(),
            type_name: "led".to_string(),
        })
    );
    assert_eq!(
        session.toggle_switch("nope"),
        Err(SessionError::NodeNotFound("nope".to_string()))
    );
}

#[test]
fn test_removing_a_wire_breaks_the_loop() {
    let mut session = series_session(true);

    assert!(session.remove_edge("wireB").unwrap());
    assert!(!flag(session.nodes(), "led", "isPowered"));
    assert_eq!(session.edges().len(), 2);

    assert_eq!(
        session.remove_edge("wireB"),
        Err(SessionError::EdgeNotFound("wireB".to_string()))
    );
}

#[test]
fn test_connect_restores_the_loop() {
    let mut session = series_session(true);
    session.remove_edge("wireB").unwrap();

    assert!(session.connect(("button", "out"), ("led", "anode")).unwrap());
    assert!(flag(session.nodes(), "led", "isPowered"));
    assert!(session.circuit().edge("button-out-led-anode").is_some());

    // A parallel wire gets its own id.
    assert!(!session.connect(("button", "out"), ("led", "anode")).unwrap());
    assert!(session.circuit().edge("button-out-led-anode-2").is_some());
}

#[test]
fn test_connect_ids_never_collide() {
    let mut session = CircuitSession::new(Simulator::new());
    session.add_node(CircuitNode::new("a-b", "battery")).unwrap();
    session.add_node(CircuitNode::new("a", "battery")).unwrap();
    session.add_node(CircuitNode::new("x", "led")).unwrap();

    session.connect(("a-b", "plus"), ("x", "anode")).unwrap();
    session.connect(("a", "b-plus"), ("x", "anode")).unwrap();

    assert_eq!(session.edges().len(), 2);
    assert_eq!(session.edges()[0].id, "a-b-plus-x-anode");
    assert_eq!(session.edges()[1].id, "a-b-plus-x-anode-2");
    assert_eq!(session.edges()[1].source, "a");
    assert_eq!(session.edges()[1].source_handle, "b-plus");
}

#[test]
fn test_add_edge_requires_both_nodes() {
    let mut session = series_session(true);
    assert_eq!(
        session.add_edge(wire("w", ("led", "anode"), ("ghost", "pin"))),
        Err(SessionError::NodeNotFound("ghost".to_string()))
    );
}

#[test]
fn test_remove_node_drops_its_wires() {
    let mut session = series_session(true);

    assert!(!session.remove_node("led").unwrap());
    assert!(session.node("led").is_none());
    assert_eq!(session.edges().len(), 1);
    assert_eq!(session.edges()[0].id, "wireA");
}

#[test]
fn test_add_node_rejects_duplicates() {
    let mut session = series_session(true);

    // A fresh buzzer gains its derived `isActive` field.
    assert!(session.add_node(CircuitNode::new("buzzer", "buzzer")).unwrap());
    assert_eq!(
        session.add_node(CircuitNode::new("buzzer", "buzzer")),
        Err(SessionError::DuplicateNode("buzzer".to_string()))
    );
}

#[test]
fn test_moving_a_node_does_not_resimulate() {
    let mut session = series_session(true);
    let before = Arc::clone(session.node("battery").unwrap());

    session.move_node("led", 120.0, 40.0).unwrap();

    let led = session.node("led").unwrap();
    assert_eq!(led.position, Position { x: 120.0, y: 40.0 });
    assert!(Arc::ptr_eq(session.node("battery").unwrap(), &before));
}

#[test]
fn test_update_node_data_merges_fields() {
    let mut session = series_session(true);

    session
        .update_node_data("battery", &patch("voltage", 3.3))
        .unwrap();

    let battery = session.node("battery").unwrap();
    assert_eq!(battery.data["voltage"], serde_json::json!(3.3));
    assert!(flag(session.nodes(), "led", "isPowered"));
}

#[test]
fn test_external_driver_owns_node_until_released() {
    let mut session = series_session(false);

    session
        .drive_external("led", &patch("isPowered", true))
        .unwrap();
    assert!(flag(session.nodes(), "led", "isPowered"));

    // Structural edits do not override the driver.
    session.toggle_switch("button").unwrap();
    session.toggle_switch("button").unwrap();
    assert!(flag(session.nodes(), "led", "isPowered"));

    assert!(session.release_external("led").unwrap());
    assert!(!flag(session.nodes(), "led", "isPowered"));
    assert!(!session.node("led").unwrap().data.contains_key("isExternallyDriven"));
}

#[test]
fn test_failures_are_reported() {
    let mut session = series_session(true);

    session
        .update_node_data("button", &patch("isClosed", "sometimes"))
        .unwrap();

    assert_eq!(session.last_failures().len(), 1);
    assert_eq!(session.last_failures()[0].stage, FailureStage::InternalEdges);

    session
        .update_node_data("button", &patch("isClosed", true))
        .unwrap();
    assert!(session.last_failures().is_empty());
}

#[test]
fn test_session_json_round_trip() {
    let session = series_session(true);
    let json = session.to_json().unwrap();

    let mut reloaded = CircuitSession::new(Simulator::new());
    assert!(!reloaded.load_json(&json).unwrap());
    assert_eq!(reloaded.nodes().len(), 3);
    assert!(flag(reloaded.nodes(), "led", "isPowered"));
}
