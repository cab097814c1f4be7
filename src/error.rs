use serde_json::Value;
use thiserror::Error;

/// Errors raised by a single component's electrical definition.
///
/// These never abort a simulation pass: the simulator logs them, records a
/// `NodeFailure` and leaves the offending node's data untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Node '{node_id}' has field '{field}' of the wrong type: expected {expected}, found '{found}'")]
    InvalidField {
        node_id: String,
        field: String,
        expected: &'static str,
        found: Value,
    },

    #[error("Definition for node '{node_id}' failed: {message}")]
    Failed { node_id: String, message: String },
}

/// Errors that can occur while loading or saving a circuit document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse circuit JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Could not access file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when converting a custom user format into a `Circuit`.
#[derive(Error, Debug, Clone)]
pub enum CircuitConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors returned by the structural mutation operations of a `CircuitSession`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Node '{0}' not found in the circuit")]
    NodeNotFound(String),

    #[error("Edge '{0}' not found in the circuit")]
    EdgeNotFound(String),

    #[error("A node with id '{0}' already exists")]
    DuplicateNode(String),

    #[error("An edge with id '{0}' already exists")]
    DuplicateEdge(String),

    #[error("Node '{node_id}' of type '{type_name}' cannot be toggled")]
    NotToggleable { node_id: String, type_name: String },
}

/// Errors that can occur while loading a `SimulationConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse simulation config: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Type mapping '{user_type}' points at unknown built-in type '{builtin_type}'")]
    UnknownBuiltin {
        user_type: String,
        builtin_type: String,
    },
}
