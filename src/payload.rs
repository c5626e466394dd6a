//! Typed request payloads for the processing endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A client-supplied JSON body.
///
/// The processing endpoints accept any JSON shape. A body that fails to
/// parse is treated as the empty object rather than rejected, so the
/// endpoints stay reachable under body-corruption experiments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Object(Map<String, Value>),
    List(Vec<Value>),
    Scalar(Value),
}

impl Payload {
    /// Parse a raw request body, falling back to the empty object on
    /// malformed or missing input.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_else(|_| Self::empty())
    }

    /// The empty object payload.
    pub fn empty() -> Self {
        Payload::Object(Map::new())
    }

    /// Number of top-level fields in the payload.
    pub fn field_count(&self) -> usize {
        match self {
            Payload::Object(map) => map.len(),
            Payload::List(items) => items.len(),
            Payload::Scalar(Value::Null) => 0,
            Payload::Scalar(_) => 1,
        }
    }
}
