//! Per-namespace generation context.

use schemaforge_schema::{Api, Namespace};

use crate::config::{GeneratorConfig, UnknownTagPolicy};
use crate::rust::TypeResolver;

/// Everything an emitter needs while lowering one namespace.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceContext<'a> {
    /// The whole schema, for cross-namespace lookups.
    pub api: &'a Api,
    /// Namespace being generated.
    pub namespace: &'a Namespace,
    /// Generator options.
    pub config: &'a GeneratorConfig,
}

impl<'a> NamespaceContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(api: &'a Api, namespace: &'a Namespace, config: &'a GeneratorConfig) -> Self {
        Self {
            api,
            namespace,
            config,
        }
    }

    /// Returns the namespace name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.namespace.name
    }

    /// Returns a type resolver relative to this namespace.
    #[must_use]
    pub fn resolver(&self) -> TypeResolver<'a> {
        TypeResolver::new(self.api, &self.namespace.name)
    }

    /// Returns the discriminator key.
    #[must_use]
    pub fn discriminator(&self) -> &'a str {
        &self.config.discriminator
    }

    /// Returns the unknown tag policy.
    #[must_use]
    pub fn unknown_tags(&self) -> UnknownTagPolicy {
        self.config.unknown_tags
    }
}
