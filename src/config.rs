use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// The data field an external driver sets to claim a node.
pub const DEFAULT_EXTERNAL_MARKER: &str = "isExternallyDriven";

/// User-facing simulation settings, loadable from JSON.
///
/// ```json
/// {
///   "externalMarker": "isExternallyDriven",
///   "typeMappings": { "redLed": "led", "tactSwitch": "button" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Boolean data field marking a node as externally driven.
    pub external_marker: String,
    /// User type tag -> registered type tag.
    pub type_mappings: BTreeMap<String, String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            external_marker: DEFAULT_EXTERNAL_MARKER.to_string(),
            type_mappings: BTreeMap::new(),
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
