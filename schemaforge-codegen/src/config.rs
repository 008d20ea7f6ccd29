//! Generator configuration.

use std::path::PathBuf;

/// Discriminator key used when none is configured.
pub const DEFAULT_DISCRIMINATOR: &str = ".tag";

/// Runtime crate referenced by generated code when none is configured.
pub const DEFAULT_RUNTIME_CRATE: &str = "schemaforge_core";

/// What a generated decoder does with a discriminator it does not know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTagPolicy {
    /// Keep the tag and leave every payload empty.
    #[default]
    Preserve,
    /// Fail with an unknown variant error.
    Reject,
}

/// A hand-written source fragment copied next to a namespace's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passthrough {
    /// Namespace the fragment belongs to.
    pub namespace: String,
    /// Path of the fragment on disk.
    pub source: PathBuf,
}

/// Options controlling generated code.
///
/// # Example
/// ```
/// use schemaforge_codegen::{GeneratorConfig, UnknownTagPolicy};
///
/// let config = GeneratorConfig::new()
///     .with_discriminator("tag")
///     .reject_unknown_tags();
/// assert_eq!(config.discriminator, "tag");
/// assert_eq!(config.unknown_tags, UnknownTagPolicy::Reject);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// JSON key carrying the variant tag of every union.
    pub discriminator: String,
    /// Path of the runtime crate used by generated code.
    pub runtime_crate: String,
    /// Handling of unknown discriminators in generated decoders.
    pub unknown_tags: UnknownTagPolicy,
    /// Extra line placed in the header comment of every generated file.
    pub header: Option<String>,
    /// Fragments copied into the output directory.
    pub passthrough: Vec<Passthrough>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            discriminator: DEFAULT_DISCRIMINATOR.to_string(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
            unknown_tags: UnknownTagPolicy::default(),
            header: None,
            passthrough: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the discriminator key.
    #[must_use]
    pub fn with_discriminator(mut self, key: impl Into<String>) -> Self {
        self.discriminator = key.into();
        self
    }

    /// Sets the runtime crate path, e.g. `schemaforge_core` or `crate::runtime`.
    #[must_use]
    pub fn with_runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the unknown tag policy.
    #[must_use]
    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    /// Makes generated decoders fail on unknown discriminators.
    #[must_use]
    pub fn reject_unknown_tags(self) -> Self {
        self.with_unknown_tags(UnknownTagPolicy::Reject)
    }

    /// Sets an extra header line.
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Adds a passthrough fragment for `namespace`.
    #[must_use]
    pub fn with_passthrough(
        mut self,
        namespace: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        self.passthrough.push(Passthrough {
            namespace: namespace.into(),
            source: source.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new();
        assert_eq!(config.discriminator, ".tag");
        assert_eq!(config.runtime_crate, "schemaforge_core");
        assert_eq!(config.unknown_tags, UnknownTagPolicy::Preserve);
        assert!(config.header.is_none());
        assert!(config.passthrough.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = GeneratorConfig::new()
            .with_discriminator("kind")
            .with_runtime_crate("crate::rt")
            .with_header("Source: api.json")
            .with_passthrough("users", "fragments/users.rs");

        assert_eq!(config.discriminator, "kind");
        assert_eq!(config.runtime_crate, "crate::rt");
        assert_eq!(config.header.as_deref(), Some("Source: api.json"));
        assert_eq!(config.passthrough.len(), 1);
        assert_eq!(config.passthrough[0].namespace, "users");
    }
}
