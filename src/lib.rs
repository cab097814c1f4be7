//! # Kairo - Circuit Simulation Engine
//!
//! **Kairo** decides which components of a hand-wired electronics circuit are
//! active. It works on the node/edge graphs produced by canvas editors: nodes
//! are component symbols (batteries, LEDs, buttons, boards, motors, displays)
//! and edges are wires between named terminals ("handles").
//!
//! Kairo does not solve voltages or currents. It performs reachability-based
//! circuit completion detection: a component is powered if and only if it
//! lies on a path that leaves a power source's positive terminal and returns
//! to that same source's negative terminal.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Circuit**: Parse a React-Flow shaped JSON document with
//!     `Circuit::from_json`, or implement `IntoCircuit` for your own format.
//! 2.  **Build a Simulator**: `Simulator::new()` knows the built-in component
//!     catalog. Use `Simulator::builder()` to alias your own type tags or to
//!     register custom `ElectricalDefinition`s.
//! 3.  **Simulate**: Call `simulate` after every structural edit. It returns
//!     the same snapshot (`Arc::ptr_eq`) when nothing changed, and otherwise a
//!     new snapshot in which only the changed nodes are new allocations.
//!
//! For editor-style use, `CircuitSession` owns the snapshot and re-runs the
//! simulation after each mutation for you.
//!
//! ## Quick Start
//!
//! ```rust
//! use kairo::prelude::*;
//!
//! let circuit = Circuit::new(
//!     vec![
//!         CircuitNode::new("battery", "battery"),
//!         CircuitNode::new("button", "button").with_data("isClosed", true),
//!         CircuitNode::new("led", "led"),
//!     ],
//!     vec![
//!         CircuitEdge::new("w1", ("battery", "plus"), ("button", "in")),
//!         CircuitEdge::new("w2", ("button", "out"), ("led", "anode")),
//!         CircuitEdge::new("w3", ("led", "cathode"), ("battery", "minus")),
//!     ],
//! );
//!
//! let simulator = Simulator::new();
//! let nodes = simulator.simulate(&circuit.nodes, &circuit.edges);
//!
//! let led = nodes.iter().find(|n| n.id == "led").unwrap();
//! assert!(led.flag("isPowered"));
//!
//! // Nothing changes on a second pass, so the very same snapshot comes back.
//! let again = simulator.simulate(&nodes, &circuit.edges);
//! assert!(std::sync::Arc::ptr_eq(&nodes, &again));
//! ```

pub mod circuit;
pub mod config;
pub mod definitions;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod session;
pub mod simulation;
