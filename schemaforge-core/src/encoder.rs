//! Encoder support for generated union types.
//!
//! A union value is written as one JSON object holding the discriminator.
//! Record payloads are flattened next to it; every other payload is nested
//! under the variant's field name. [`UnionEncoder`] assembles that object.

use crate::error::{EncodeError, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Builder for the JSON object of one union value.
///
/// # Example
/// ```
/// use schemaforge_core::UnionEncoder;
/// use serde_json::json;
///
/// let mut encoder = UnionEncoder::new("tag", "rate_limit");
/// encoder.flatten(&json!({ "limit": 42 })).unwrap();
/// assert_eq!(encoder.into_value(), json!({ "tag": "rate_limit", "limit": 42 }));
/// ```
#[derive(Debug, Clone)]
pub struct UnionEncoder {
    key: String,
    tag: String,
    object: Map<String, Value>,
}

impl UnionEncoder {
    /// Starts an object carrying `tag` under the discriminator `key`.
    #[must_use]
    pub fn new(key: &str, tag: &str) -> Self {
        let mut object = Map::new();
        object.insert(key.to_string(), Value::String(tag.to_string()));
        Self {
            key: key.to_string(),
            tag: tag.to_string(),
            object,
        }
    }

    /// Returns the tag being encoded.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Merges the keys of a record payload into the object.
    ///
    /// # Errors
    /// Returns `EncodeError` if the payload fails to serialize, is not a
    /// JSON object, or carries the discriminator key itself.
    pub fn flatten<T>(&mut self, payload: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        match serde_json::to_value(payload)? {
            Value::Object(fields) => {
                for (key, value) in fields {
                    if key == self.key {
                        return Err(EncodeError::DiscriminatorCollision {
                            tag: self.tag.clone(),
                            key,
                        });
                    }
                    self.object.insert(key, value);
                }
                Ok(())
            }
            other => Err(EncodeError::NotAnObject {
                tag: self.tag.clone(),
                found: json_kind(&other),
            }),
        }
    }

    /// Inserts a payload under `field`.
    ///
    /// # Errors
    /// Returns `EncodeError` if the payload fails to serialize.
    pub fn nest<T>(&mut self, field: &str, payload: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(payload)?;
        self.object.insert(field.to_string(), value);
        Ok(())
    }

    /// Returns the assembled JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }

    /// Writes the assembled object to `serializer`.
    ///
    /// # Errors
    /// Returns the serializer's error if writing fails.
    pub fn finish<S>(self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.object.serialize(serializer)
    }
}

/// Encodes any serializable value to JSON.
///
/// # Errors
/// Returns `EncodeError` if serialization fails.
pub fn encode_value<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    Ok(serde_json::to_value(value)?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
