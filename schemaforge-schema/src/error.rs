//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema loading operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema validation and graph lookups.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Loading error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Type not found.
    #[error("type '{name}' not found")]
    TypeNotFound {
        /// Qualified type name.
        name: String,
    },

    /// A reference that must name a record names something else.
    #[error("type '{name}' is not a record")]
    NotARecord {
        /// Qualified type name.
        name: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (namespace, type, field).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Duplicate tag within one union or family.
    #[error("duplicate tag '{tag}' in '{owner}'")]
    DuplicateTag {
        /// Union or family name.
        owner: String,
        /// Repeated tag.
        tag: String,
    },

    /// Circular parent chain.
    #[error("circular parent chain detected: {path}")]
    CircularReference {
        /// Path of the cycle.
        path: String,
    },

    /// Default value does not fit its field.
    #[error("invalid default for field '{field}' in '{owner}': {message}")]
    InvalidDefault {
        /// Owning record.
        owner: String,
        /// Field name.
        field: String,
        /// Reason.
        message: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a type-not-found error.
    pub fn not_found(name: impl ToString) -> Self {
        Self::TypeNotFound {
            name: name.to_string(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid default error.
    pub fn invalid_default(
        owner: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidDefault {
            owner: owner.into(),
            field: field.into(),
            message: message.into(),
        }
    }
}
