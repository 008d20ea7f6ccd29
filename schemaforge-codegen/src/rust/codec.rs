//! Tagged-union JSON codec generation.
//!
//! A union value is one JSON object carrying the discriminator. Plain record
//! payloads are flattened next to it; every other payload is nested under the
//! variant's field name. Decoding happens in two phases: an envelope holding
//! the discriminator and the raw nested payloads, then the selected payload.

use schemaforge_schema::{DataType, PolymorphicFamily, Record, TypeRef, Union};

use crate::context::NamespaceContext;
use crate::error::CodegenError;
use crate::ir::{CodecArm, PayloadField, PayloadKind, UnionCodec};
use crate::naming::{family_union, field_ident, tag_const, type_ident};
use crate::rust::FieldEmitter;

/// Generator for union encode and decode implementations.
pub struct UnionCodecGenerator<'a> {
    ctx: NamespaceContext<'a>,
}

impl<'a> UnionCodecGenerator<'a> {
    /// Creates a new codec generator.
    #[must_use]
    pub fn new(ctx: NamespaceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Classifies the payload of a variant.
    ///
    /// Only non-nullable records outside a polymorphic family are flattened.
    /// Family members carry their own discriminator, and unions, primitives
    /// and lists have no keys of their own, so they are nested.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if a named payload does not exist.
    pub fn payload_kind(
        &self,
        payload: &TypeRef,
        context: &str,
    ) -> Result<PayloadKind, CodegenError> {
        match payload {
            TypeRef::Void => Ok(PayloadKind::Void),
            TypeRef::Named(name) => match self.ctx.resolver().lookup(name, context)? {
                DataType::Record(record) if record.family.is_none() => Ok(PayloadKind::Flattened),
                _ => Ok(PayloadKind::Nested),
            },
            TypeRef::Primitive(_) | TypeRef::List(_) | TypeRef::Nullable(_) => {
                Ok(PayloadKind::Nested)
            }
        }
    }

    /// Builds the codec of an explicit union.
    ///
    /// # Errors
    /// Returns `CodegenError` if a payload type cannot be resolved.
    pub fn for_union(&self, union: &Union) -> Result<UnionCodec, CodegenError> {
        let fields = FieldEmitter::new(self.ctx);
        let mut arms = Vec::with_capacity(union.variants.len());

        for variant in &union.variants {
            let tag_const = tag_const(&union.name, &variant.name);
            let kind = self.payload_kind(&variant.payload, &variant.name)?;
            let decl = fields.emit_variant(variant)?;

            let arm = match (kind, decl) {
                (PayloadKind::Void, _) | (_, None) => CodecArm::Void { tag_const },
                (PayloadKind::Flattened, Some(decl)) => CodecArm::Flattened {
                    tag_const,
                    field: PayloadField {
                        ident: decl.ident,
                        wire_name: decl.wire_name,
                        ty: decl.ty.strip_optional().clone(),
                    },
                },
                (PayloadKind::Nested, Some(decl)) => CodecArm::Nested {
                    tag_const,
                    field: PayloadField {
                        ident: decl.ident,
                        wire_name: decl.wire_name,
                        ty: decl.ty.strip_optional().clone(),
                    },
                    nullable: variant.payload.is_nullable(),
                },
            };
            arms.push(arm);
        }

        Ok(UnionCodec {
            container: type_ident(&union.name),
            discriminator: self.ctx.discriminator().to_string(),
            arms,
            unknown_tags: self.ctx.unknown_tags(),
        })
    }

    /// Builds the codec of the union container of a polymorphic record.
    ///
    /// Every subtype is a flattened arm holding the concrete subtype.
    ///
    /// # Errors
    /// Returns `CodegenError` if a subtype does not exist.
    pub fn for_family(
        &self,
        record: &Record,
        family: &PolymorphicFamily,
    ) -> Result<UnionCodec, CodegenError> {
        let resolver = self.ctx.resolver();
        let arms = family
            .subtypes
            .iter()
            .map(|subtype| {
                Ok(CodecArm::Flattened {
                    tag_const: tag_const(&record.name, &subtype.tag),
                    field: PayloadField {
                        ident: field_ident(&subtype.tag),
                        wire_name: subtype.tag.clone(),
                        ty: resolver.named(&subtype.record, &subtype.tag)?.boxed(),
                    },
                })
            })
            .collect::<Result<Vec<_>, CodegenError>>()?;

        Ok(UnionCodec {
            container: family_union(&record.name),
            discriminator: self.ctx.discriminator().to_string(),
            arms,
            unknown_tags: self.ctx.unknown_tags(),
        })
    }
}
