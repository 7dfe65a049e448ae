//! Decoded response bodies

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ResponseFormat;
use crate::{HuginnError, Result};

/// A decoded response body, opaque to the cache.
///
/// Serialises transparently: JSON payloads as the value itself, text
/// payloads as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Json(serde_json::Value),
    Text(String),
}

impl Payload {
    /// Decode a raw body according to `format`.
    pub fn decode(format: ResponseFormat, body: &[u8]) -> Result<Self> {
        match format {
            ResponseFormat::Json => serde_json::from_slice(body)
                .map(Payload::Json)
                .map_err(|e| HuginnError::Decode(e.to_string())),
            ResponseFormat::Text => String::from_utf8(body.to_vec())
                .map(Payload::Text)
                .map_err(|e| HuginnError::Decode(e.to_string())),
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Json(v) => Some(v),
            Payload::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Json(_) => None,
            Payload::Text(s) => Some(s),
        }
    }

    /// Deserialize the payload into a typed value.
    ///
    /// Text payloads are parsed as JSON first.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        match self {
            Payload::Json(v) => {
                serde_json::from_value(v.clone()).map_err(|e| HuginnError::Decode(e.to_string()))
            }
            Payload::Text(s) => {
                serde_json::from_str(s).map_err(|e| HuginnError::Decode(e.to_string()))
            }
        }
    }

    /// Approximate stored size in bytes, used for cache quota accounting.
    pub fn size_bytes(&self) -> u64 {
        match self {
            Payload::Json(v) => v.to_string().len() as u64,
            Payload::Text(s) => s.len() as u64,
        }
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}
