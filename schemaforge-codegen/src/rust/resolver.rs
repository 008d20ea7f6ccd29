//! Mapping of schema type references onto Rust type expressions.

use schemaforge_schema::{Api, DataType, TypeName, TypeRef};

use crate::error::CodegenError;
use crate::ir::TypeExpr;
use crate::naming::{marker_trait, module_ident, type_ident};

/// Resolves type references relative to one namespace.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    api: &'a Api,
    namespace: &'a str,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver for types referenced from `namespace`.
    #[must_use]
    pub fn new(api: &'a Api, namespace: &'a str) -> Self {
        Self { api, namespace }
    }

    /// Resolves a type reference.
    ///
    /// With `use_abstract` set, a reference to a polymorphic record resolves
    /// to its interface trait object so that any family member fits.
    ///
    /// # Arguments
    /// * `type_ref` - Reference to resolve
    /// * `use_abstract` - Whether polymorphic records use their interface
    /// * `context` - Field or variant making the reference, for errors
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if a named type does not exist and
    /// `CodegenError::Generation` for a void reference.
    pub fn resolve(
        &self,
        type_ref: &TypeRef,
        use_abstract: bool,
        context: &str,
    ) -> Result<TypeExpr, CodegenError> {
        match type_ref {
            TypeRef::Void => Err(CodegenError::generation(format!(
                "void has no Rust type (referenced by '{context}')"
            ))),
            TypeRef::Primitive(primitive) => Ok(TypeExpr::Primitive(*primitive)),
            TypeRef::Named(name) => {
                let data_type = self.lookup(name, context)?;
                match data_type {
                    DataType::Record(record) if use_abstract && record.family.is_some() => {
                        Ok(self.marker(name).boxed())
                    }
                    _ => self.named(name, context),
                }
            }
            TypeRef::List(inner) => Ok(self.resolve(inner, use_abstract, context)?.list()),
            TypeRef::Nullable(inner) => {
                let inner = self.resolve(inner, use_abstract, context)?;
                Ok(inner.boxed_if_named().optional())
            }
        }
    }

    /// Resolves a named type to its concrete struct.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if the type does not exist.
    pub fn named(&self, name: &TypeName, context: &str) -> Result<TypeExpr, CodegenError> {
        let data_type = self.lookup(name, context)?;
        Ok(TypeExpr::Named {
            module: self.module_for(&name.namespace),
            name: type_ident(data_type.name()),
        })
    }

    /// Returns the interface trait of a polymorphic record.
    #[must_use]
    pub fn marker(&self, name: &TypeName) -> TypeExpr {
        TypeExpr::Dyn {
            module: self.module_for(&name.namespace),
            name: marker_trait(&name.name),
        }
    }

    /// Looks up a named type.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if the type does not exist.
    pub fn lookup(&self, name: &TypeName, context: &str) -> Result<&'a DataType, CodegenError> {
        self.api
            .lookup(name)
            .ok_or_else(|| CodegenError::unknown_type(name, context))
    }

    /// Returns the module qualifying types of `namespace`, if it is not the
    /// namespace being generated.
    #[must_use]
    pub fn module_for(&self, namespace: &str) -> Option<String> {
        (namespace != self.namespace).then(|| module_ident(namespace))
    }
}
