//! Partitioning, handle graphs and loop tracing.
mod common;
use common::*;
use kairo::graph::{PathTracer, partition_circuit};
use kairo::prelude::*;

fn refs(circuit: &Circuit) -> (Vec<&CircuitNode>, Vec<&CircuitEdge>) {
    (
        circuit.nodes.iter().map(|n| n.as_ref()).collect(),
        circuit.edges.iter().collect(),
    )
}

#[test]
fn test_handle_key_display() {
    assert_eq!(HandleKey::new("led1", "anode").to_string(), "led1:anode");
}

#[test]
fn test_wires_are_undirected_in_handle_graph() {
    let edge = wire("w", ("a", "out"), ("b", "in"));
    let mut graph = HandleGraph::from_wires([&edge]);

    assert_eq!(graph.neighbors(&HandleKey::new("a", "out")), &[HandleKey::new("b", "in")]);
    assert_eq!(graph.neighbors(&HandleKey::new("b", "in")), &[HandleKey::new("a", "out")]);
    assert!(graph.is_connected("a", "out"));
    assert!(!graph.is_connected("a", "in"));

    // Parallel wires between the same handles collapse to one adjacency.
    graph.add_wire(&wire("w2", ("b", "in"), ("a", "out")));
    assert_eq!(graph.degree("a", "out"), 1);
    assert_eq!(graph.handle_count(), 2);
}

#[test]
fn test_partition_groups_by_wires() {
    let circuit = Circuit::new(
        vec![
            CircuitNode::new("a", "led"),
            CircuitNode::new("b", "led"),
            CircuitNode::new("c", "led"),
            CircuitNode::new("d", "led"),
        ],
        vec![
            wire("w1", ("a", "anode"), ("c", "cathode")),
            // Dangling: must not pull anything together.
            wire("w2", ("b", "anode"), ("ghost", "pin")),
        ],
    );

    let partitions = partition_circuit(&circuit.nodes, &circuit.edges);

    assert_eq!(partitions.len(), 3);
    assert_eq!(partitions[0].node_ids(), ["a", "c"]);
    assert!(partitions[0].contains("c"));
    assert_eq!(partitions[1].node_ids(), ["b"]);
    assert_eq!(partitions[2].node_ids(), ["d"]);
}

#[test]
fn test_partition_ignores_handles() {
    // Node-level connectivity: any wire joins, even one landing on a handle
    // the component does not conduct through.
    let circuit = Circuit::new(
        vec![
            CircuitNode::new("battery", "battery"),
            CircuitNode::new("lcd", "lcd"),
        ],
        vec![wire("w", ("battery", "plus"), ("lcd", "sda"))],
    );

    let partitions = partition_circuit(&circuit.nodes, &circuit.edges);

    assert_eq!(partitions.len(), 1);
    assert_eq!(partitions[0].len(), 2);
}

#[test]
fn test_partition_of_empty_circuit() {
    let circuit = Circuit::default();
    assert!(partition_circuit(&circuit.nodes, &circuit.edges).is_empty());
}

#[test]
fn test_tracer_collects_loop_members() {
    let circuit = create_series_circuit(true);
    let registry = DefinitionRegistry::with_builtins();
    let (nodes, edges) = refs(&circuit);

    let trace = PathTracer::new(&registry).trace(&nodes, &edges);

    let mut completed: Vec<_> = trace.completed.into_iter().collect();
    completed.sort();
    assert_eq!(completed, ["battery", "button", "led"]);
    assert!(trace.failures.is_empty());
}

#[test]
fn test_tracer_open_switch_completes_nothing() {
    let circuit = create_series_circuit(false);
    let registry = DefinitionRegistry::with_builtins();
    let (nodes, edges) = refs(&circuit);

    let trace = PathTracer::new(&registry).trace(&nodes, &edges);

    assert!(trace.completed.is_empty());
}

#[test]
fn test_tracer_skips_dead_end_branch() {
    let circuit = Circuit::new(
        vec![
            CircuitNode::new("battery", "battery"),
            CircuitNode::new("led", "led"),
            CircuitNode::new("stub", "buzzer"),
        ],
        vec![
            wire("w1", ("battery", "plus"), ("led", "anode")),
            wire("w2", ("led", "cathode"), ("battery", "minus")),
            wire("w3", ("battery", "plus"), ("stub", "positive")),
        ],
    );
    let registry = DefinitionRegistry::with_builtins();
    let (nodes, edges) = refs(&circuit);

    let trace = PathTracer::new(&registry).trace(&nodes, &edges);

    assert!(trace.completed.contains("led"));
    assert!(!trace.completed.contains("stub"));
}

#[test]
fn test_tracer_without_registry_entries() {
    let circuit = create_series_circuit(true);
    let registry = DefinitionRegistry::empty();
    let (nodes, edges) = refs(&circuit);

    let trace = PathTracer::new(&registry).trace(&nodes, &edges);

    assert!(trace.completed.is_empty());
    assert!(trace.failures.is_empty());
}
