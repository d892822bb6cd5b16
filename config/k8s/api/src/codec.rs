//! Decoding and encoding of configuration documents.
//!
//! Decoding fails when a required field is missing or a value has the wrong
//! type. Nothing beyond the document's shape is checked.

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn from_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(bytes).map_err(|error| {
        debug!(%error, "Failed to decode JSON document");
        Error::Json(error)
    })
}

/// Decodes an already-parsed document, e.g. one taken from a dynamic object.
pub fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|error| {
        debug!(%error, "Failed to decode JSON value");
        Error::Json(error)
    })
}

pub fn from_yaml<T: DeserializeOwned>(doc: &str) -> Result<T, Error> {
    serde_yaml::from_str(doc).map_err(|error| {
        debug!(%error, "Failed to decode YAML document");
        Error::Yaml(error)
    })
}

pub fn to_json<T: Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    Ok(serde_json::to_vec(value)?)
}

pub fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value, Error> {
    Ok(serde_json::to_value(value)?)
}

pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, Error> {
    Ok(serde_yaml::to_string(value)?)
}
