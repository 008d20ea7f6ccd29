//! Error types for schemaforge runtime operations.

use thiserror::Error;

/// Error raised while encoding a union value.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Payload could not be converted to JSON.
    #[error("payload encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A flattened payload did not encode as a JSON object.
    #[error("flattened payload for tag '{tag}' must encode as a JSON object, got {found}")]
    NotAnObject {
        /// Tag being encoded.
        tag: String,
        /// JSON kind that was produced instead.
        found: &'static str,
    },

    /// A payload key collides with the discriminator key.
    #[error("payload for tag '{tag}' contains the discriminator key '{key}'")]
    DiscriminatorCollision {
        /// Tag being encoded.
        tag: String,
        /// Discriminator key.
        key: String,
    },
}

/// Result type alias for schemaforge runtime operations.
pub type Result<T> = std::result::Result<T, EncodeError>;
