//! Field declarations of generated structs.

use schemaforge_schema::{Field, PrimitiveType, TypeName, Variant};

use crate::context::NamespaceContext;
use crate::error::CodegenError;
use crate::ir::{FieldDecl, FieldEncoding, TypeExpr};
use crate::naming::{field_ident, type_ident};

/// Emits struct fields for record fields, union variants and parents.
pub struct FieldEmitter<'a> {
    ctx: NamespaceContext<'a>,
}

impl<'a> FieldEmitter<'a> {
    /// Creates a new field emitter.
    #[must_use]
    pub fn new(ctx: NamespaceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Emits the struct field of a record field.
    ///
    /// Nullable fields are omitted from the encoding when empty. Fields with
    /// a default decode to their zero value when absent.
    ///
    /// # Errors
    /// Returns `CodegenError` if the field type cannot be resolved.
    pub fn emit(&self, field: &Field) -> Result<FieldDecl, CodegenError> {
        let ty = self
            .ctx
            .resolver()
            .resolve(&field.type_ref, true, &field.name)?;
        let encoding = if field.type_ref.is_nullable() {
            FieldEncoding::OmitWhenAbsent
        } else if field.default.is_some() {
            FieldEncoding::DefaultWhenAbsent
        } else {
            FieldEncoding::Plain
        };
        Ok(FieldDecl {
            ident: field_ident(&field.name),
            wire_name: field.name.clone(),
            ty,
            doc: field.doc.clone(),
            encoding,
        })
    }

    /// Emits the payload field of a union variant, or `None` for a void
    /// variant.
    ///
    /// # Errors
    /// Returns `CodegenError` if the payload type cannot be resolved.
    pub fn emit_variant(&self, variant: &Variant) -> Result<Option<FieldDecl>, CodegenError> {
        if variant.payload.is_void() {
            return Ok(None);
        }
        let ty = self
            .ctx
            .resolver()
            .resolve(&variant.payload, true, &variant.name)?;
        let ty = if ty.is_optional() {
            ty
        } else {
            ty.boxed_if_named().optional()
        };
        Ok(Some(FieldDecl {
            ident: field_ident(&variant.name),
            wire_name: variant.name.clone(),
            ty,
            doc: variant.doc.clone(),
            encoding: FieldEncoding::OmitWhenAbsent,
        }))
    }

    /// Emits the field embedding a record's parent.
    ///
    /// # Errors
    /// Returns `CodegenError` if the parent does not exist.
    pub fn emit_parent(&self, parent: &TypeName, child: &str) -> Result<FieldDecl, CodegenError> {
        let ty = self.ctx.resolver().named(parent, child)?;
        let ident = field_ident(&parent.name);
        Ok(FieldDecl {
            wire_name: ident.clone(),
            ident,
            ty,
            doc: Some(format!("Fields inherited from `{}`.", type_ident(&parent.name))),
            encoding: FieldEncoding::Flatten,
        })
    }

    /// Emits the discriminator field of a union container.
    #[must_use]
    pub fn emit_tag(&self) -> FieldDecl {
        FieldDecl {
            ident: "tag".to_string(),
            wire_name: self.ctx.discriminator().to_string(),
            ty: TypeExpr::Primitive(PrimitiveType::String),
            doc: Some("Tag of the variant this value holds.".to_string()),
            encoding: FieldEncoding::Plain,
        }
    }
}
