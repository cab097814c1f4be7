use super::definition::Circuit;
use crate::error::CircuitConversionError;

/// A trait for custom editor formats that can be converted into a kairo `Circuit`.
///
/// Kairo reads React-Flow shaped JSON out of the box. Editors that store their
/// graphs differently implement this trait to provide a translation layer.
///
/// # Example
///
/// ```rust
/// use kairo::prelude::*;
/// use kairo::error::CircuitConversionError;
///
/// struct Part { name: String, kind: String }
/// struct Schematic { parts: Vec<Part> }
///
/// impl IntoCircuit for Schematic {
///     fn into_circuit(self) -> std::result::Result<Circuit, CircuitConversionError> {
///         let nodes = self
///             .parts
///             .into_iter()
///             .map(|p| CircuitNode::new(p.name, p.kind))
///             .collect();
///         Ok(Circuit::new(nodes, vec![]))
///     }
/// }
///
/// let circuit = Schematic {
///     parts: vec![Part { name: "b1".into(), kind: "battery".into() }],
/// }
/// .into_circuit()
/// .unwrap();
/// assert_eq!(circuit.nodes.len(), 1);
/// ```
pub trait IntoCircuit {
    /// Consumes the object and converts it into a kairo circuit.
    fn into_circuit(self) -> Result<Circuit, CircuitConversionError>;
}

impl IntoCircuit for Circuit {
    fn into_circuit(self) -> Result<Circuit, CircuitConversionError> {
        Ok(self)
    }
}
