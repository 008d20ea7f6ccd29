//! JSON schema loader.
//!
//! The schema front-end hands over its validated namespace/type graph as
//! JSON. This module turns that document into an [`Api`].

use crate::error::ParseError;
use crate::types::Api;
use std::path::Path;

/// Parses a schema from a JSON string.
///
/// # Arguments
/// * `json` - Schema document
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or does not match the model.
pub fn parse_api(json: &str) -> Result<Api, ParseError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a schema from a JSON file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_api_file(path: &Path) -> Result<Api, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_api(&json)
}

impl Api {
    /// Parses a schema from a JSON string.
    ///
    /// # Errors
    /// Returns `ParseError` if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, ParseError> {
        parse_api(json)
    }

    /// Parses a schema from a JSON file.
    ///
    /// # Errors
    /// Returns `ParseError` if reading or parsing fails.
    pub fn from_file(path: &Path) -> Result<Self, ParseError> {
        parse_api_file(path)
    }

    /// Serializes the schema back to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
