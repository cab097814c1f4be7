//! Electrical definitions: per-component-type conduction and state rules.
//!
//! Every component type registers one [`ElectricalDefinition`]. The engine
//! never looks at a node's data itself; it asks the node's definition which
//! internal edges the node currently exposes and what state it should show
//! once the completed loops are known.

use crate::circuit::{DataPatch, NodeData};
use crate::error::DefinitionError;
use crate::graph::HandleKey;
use crate::simulation::TraversalContext;
use ahash::AHashMap;
use itertools::Itertools;
use std::sync::Arc;

mod battery;
mod board;
mod button;
pub mod fields;
mod motor;
mod passive;
mod rgb_led;
mod seven_segment;

pub use battery::BatteryDefinition;
pub use board::{BoardDefinition, BoardRails};
pub use button::ButtonDefinition;
pub use motor::MotorDefinition;
pub use passive::{BuzzerDefinition, LcdDefinition, LedDefinition, ServoDefinition};
pub use rgb_led::RgbLedDefinition;
pub use seven_segment::SevenSegmentDefinition;

/// A directed conduction path between two handles, declared by a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InternalEdge {
    pub from: HandleKey,
    pub to: HandleKey,
}

impl InternalEdge {
    /// An edge routed inside a single node.
    pub fn within(node_id: &str, from_handle: &str, to_handle: &str) -> Self {
        Self {
            from: HandleKey::new(node_id, from_handle),
            to: HandleKey::new(node_id, to_handle),
        }
    }
}

/// The terminals a power source is traced between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTerminals {
    pub positive: &'static str,
    pub negative: &'static str,
}

/// Defines the contract every component type implements.
///
/// Both operations must be pure: the same inputs always give the same output
/// and nothing outside the return value is touched.
pub trait ElectricalDefinition: Send + Sync {
    /// The type tag this definition is registered under.
    fn node_type(&self) -> &str;

    /// Returns `false` for handles the component does not have. Wires naming
    /// such a handle are treated as dangling.
    fn has_handle(&self, _handle: &str) -> bool {
        true
    }

    /// `Some` if the component is a power source.
    fn source_terminals(&self) -> Option<SourceTerminals> {
        None
    }

    /// The boolean field a user flips to toggle this component, if any.
    fn toggle_field(&self) -> Option<&'static str> {
        None
    }

    /// How current may flow inside the component given its present data.
    fn internal_edges(
        &self,
        node_id: &str,
        data: &NodeData,
    ) -> Result<Vec<InternalEdge>, DefinitionError>;

    /// The component's next visible state. `None` means this type derives no
    /// state and the node is left alone.
    fn derive_state(
        &self,
        context: &TraversalContext<'_>,
    ) -> Result<Option<DataPatch>, DefinitionError>;
}

/// Lookup table from type tag to electrical definition.
#[derive(Clone)]
pub struct DefinitionRegistry {
    definitions: AHashMap<String, Arc<dyn ElectricalDefinition>>,
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        register_default_definitions(&mut registry);
        registry
    }
}

impl DefinitionRegistry {
    /// A registry with no definitions at all.
    pub fn empty() -> Self {
        Self {
            definitions: AHashMap::new(),
        }
    }

    /// A registry preloaded with the built-in component catalog.
    pub fn with_builtins() -> Self {
        Self::default()
    }

    /// Registers `definition` under its own type tag, replacing any previous one.
    pub fn register(&mut self, definition: Box<dyn ElectricalDefinition>) {
        let definition: Arc<dyn ElectricalDefinition> = Arc::from(definition);
        self.definitions
            .insert(definition.node_type().to_string(), definition);
    }

    /// Makes `user_type` behave exactly like the already registered
    /// `existing_type`. Returns `false` if `existing_type` is unknown.
    pub fn alias(&mut self, user_type: &str, existing_type: &str) -> bool {
        match self.definitions.get(existing_type).cloned() {
            Some(definition) => {
                self.definitions.insert(user_type.to_string(), definition);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, node_type: &str) -> Option<&dyn ElectricalDefinition> {
        self.definitions.get(node_type).map(|d| d.as_ref())
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.definitions.contains_key(node_type)
    }

    /// Returns `true` if a wire may attach to `handle` on a node of
    /// `node_type`. Unknown types accept every handle.
    pub fn accepts_handle(&self, node_type: &str, handle: &str) -> bool {
        self.get(node_type).is_none_or(|d| d.has_handle(handle))
    }

    /// Registered type tags, sorted.
    pub fn types(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).sorted().collect()
    }
}

/// Registers the built-in component catalog.
pub(crate) fn register_default_definitions(registry: &mut DefinitionRegistry) {
    registry.register(Box::new(BatteryDefinition));
    registry.register(Box::new(ButtonDefinition));
    registry.register(Box::new(LedDefinition));
    registry.register(Box::new(BuzzerDefinition));
    registry.register(Box::new(LcdDefinition));
    registry.register(Box::new(ServoDefinition));
    registry.register(Box::new(MotorDefinition));
    registry.register(Box::new(RgbLedDefinition));
    registry.register(Box::new(SevenSegmentDefinition));
    registry.register(Box::new(BoardDefinition::arduino_uno()));
    registry.register(Box::new(BoardDefinition::arduino_nano()));
    registry.register(Box::new(BoardDefinition::esp32()));
}
