//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kairo crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use kairo::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let circuit = Circuit::from_file("path/to/circuit.json")?;
//! let simulator = Simulator::new();
//! let outcome = simulator.run(&circuit.nodes, &circuit.edges);
//!
//! for node in outcome.nodes.iter() {
//!     println!("{} powered: {}", node.id, node.flag("isPowered"));
//! }
//! # Ok(())
//! # }
//! ```

// Simulation
pub use crate::session::CircuitSession;
pub use crate::simulation::{
    FailureStage, NodeFailure, SimulationOutcome, Simulator, SimulatorBuilder, TraversalContext,
};

// Circuit data model
pub use crate::circuit::{
    Circuit, CircuitEdge, CircuitNode, DataPatch, IntoCircuit, NodeData, NodeSnapshot, Position,
};

// Definitions
pub use crate::definitions::{
    DefinitionRegistry, ElectricalDefinition, InternalEdge, SourceTerminals,
};
pub use crate::graph::{HandleGraph, HandleKey};

// Configuration
pub use crate::config::SimulationConfig;

// Error types
pub use crate::error::{DefinitionError, DocumentError, SessionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
