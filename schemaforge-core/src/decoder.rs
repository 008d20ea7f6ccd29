//! Decoder support for generated union types.
//!
//! Generated decoders read their input into an untyped [`Value`] first,
//! decode a small envelope holding the discriminator and any nested payloads,
//! and then decode the selected payload in a second pass.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a typed value out of an already parsed JSON value.
///
/// # Errors
/// Returns the JSON error if the value does not match `T`.
pub fn decode_value<T>(value: &Value) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

/// Returns the discriminator of a union object, if present and a string.
#[must_use]
pub fn discriminator<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
