//! Typed readers for node data fields.
//!
//! A missing field reads as its neutral value; a field holding the wrong JSON
//! type is a `DefinitionError::InvalidField`.

use crate::circuit::NodeData;
use crate::error::DefinitionError;
use serde_json::Value;

pub fn read_bool(node_id: &str, data: &NodeData, field: &str) -> Result<bool, DefinitionError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(invalid(node_id, field, "a boolean", other)),
    }
}

pub fn read_str<'d>(
    node_id: &str,
    data: &'d NodeData,
    field: &str,
) -> Result<Option<&'d str>, DefinitionError> {
    match data.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(invalid(node_id, field, "a string", other)),
    }
}

fn invalid(node_id: &str, field: &str, expected: &'static str, found: &Value) -> DefinitionError {
    DefinitionError::InvalidField {
        node_id: node_id.to_string(),
        field: field.to_string(),
        expected,
        found: found.clone(),
    }
}

/// Builds a patch from `(field, value)` pairs.
pub fn patch_of<'f>(entries: impl IntoIterator<Item = (&'f str, Value)>) -> crate::circuit::DataPatch {
    entries
        .into_iter()
        .map(|(field, value)| (field.to_string(), value))
        .collect()
}
