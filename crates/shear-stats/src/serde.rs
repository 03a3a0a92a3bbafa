use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use shear_core::errors::{ErrorInfo, ShearError};

fn serde_error(code: &str, err: impl ToString) -> ShearError {
    ShearError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
///
/// Non-finite floats are written as `null`.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ShearError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-serialize", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Pretty-printed variant of [`to_canonical_json_bytes`] for files meant to be read by people.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ShearError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-serialize", err))?;
    let mut bytes = serde_json::to_vec_pretty(&canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ShearError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-deserialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, ShearError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("yaml-deserialize", err))
}
