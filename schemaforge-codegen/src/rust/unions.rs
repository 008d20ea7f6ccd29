//! Union container generation.

use schemaforge_schema::{PolymorphicFamily, Record, Union};
use tracing::debug;

use crate::context::NamespaceContext;
use crate::error::CodegenError;
use crate::ir::{
    FieldDecl, FieldEncoding, Item, MarkerTrait, SerdeImpl, StructDecl, TagConst, TagTable,
};
use crate::naming::{
    family_union, field_ident, marker_trait, tag_const, to_snake_case, type_ident,
};
use crate::rust::{FieldEmitter, UnionCodecGenerator};

/// Generator for union containers, tag constants and family interfaces.
pub struct UnionEmitter<'a> {
    ctx: NamespaceContext<'a>,
}

impl<'a> UnionEmitter<'a> {
    /// Creates a new union emitter.
    #[must_use]
    pub fn new(ctx: NamespaceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Emits an explicit union.
    ///
    /// The container has a `tag` field plus one optional field per variant
    /// with a payload. A union whose variants are all void derives its serde
    /// implementations; any other union gets a generated codec.
    ///
    /// # Errors
    /// Returns `CodegenError` if a payload type cannot be resolved.
    pub fn emit_union(&self, union: &Union) -> Result<Vec<Item>, CodegenError> {
        debug!("Emitting union {}.{}", self.ctx.name(), union.name);
        let fields = FieldEmitter::new(self.ctx);

        let mut decls = vec![fields.emit_tag()];
        for variant in &union.variants {
            if let Some(decl) = fields.emit_variant(variant)? {
                decls.push(decl);
            }
        }

        let all_void = union.is_all_void();
        let container = type_ident(&union.name);
        let mut items = vec![
            Item::Struct(StructDecl {
                name: container.clone(),
                doc: union.doc.clone(),
                fields: decls,
                serde: if all_void {
                    SerdeImpl::Derive
                } else {
                    SerdeImpl::Codec
                },
                tagged: true,
            }),
            Item::TagTable(TagTable {
                owner: union.name.clone(),
                container,
                entries: union
                    .variants
                    .iter()
                    .map(|variant| TagConst {
                        name: tag_const(&union.name, &variant.name),
                        tag: variant.tag().to_string(),
                    })
                    .collect(),
            }),
        ];

        if !all_void {
            items.push(Item::Codec(
                UnionCodecGenerator::new(self.ctx).for_union(union)?,
            ));
        }
        Ok(items)
    }

    /// Emits the interface trait and union container of a polymorphic
    /// record.
    ///
    /// # Errors
    /// Returns `CodegenError` if a subtype does not exist.
    pub fn emit_family(
        &self,
        record: &Record,
        family: &PolymorphicFamily,
    ) -> Result<Vec<Item>, CodegenError> {
        debug!(
            "Emitting family {}.{} with {} subtypes",
            self.ctx.name(),
            record.name,
            family.subtypes.len()
        );
        let resolver = self.ctx.resolver();
        let fields = FieldEmitter::new(self.ctx);
        let container = family_union(&record.name);

        let mut members = Vec::with_capacity(family.subtypes.len());
        let mut decls = vec![fields.emit_tag()];
        for subtype in &family.subtypes {
            let ty = resolver.named(&subtype.record, &subtype.tag)?;
            members.push((ty.clone(), tag_const(&record.name, &subtype.tag)));
            decls.push(FieldDecl {
                ident: field_ident(&subtype.tag),
                wire_name: subtype.tag.clone(),
                ty: ty.boxed().optional(),
                doc: None,
                encoding: FieldEncoding::OmitWhenAbsent,
            });
        }

        let has_members = !members.is_empty();
        let mut items = vec![
            Item::MarkerTrait(MarkerTrait {
                trait_name: marker_trait(&record.name),
                base: type_ident(&record.name),
                method_suffix: to_snake_case(&record.name),
                discriminator: self.ctx.discriminator().to_string(),
                members,
                unknown_tags: self.ctx.unknown_tags(),
            }),
            Item::Struct(StructDecl {
                name: container.clone(),
                doc: Some(format!(
                    "Holds exactly one member of the `{}` family.",
                    type_ident(&record.name)
                )),
                fields: decls,
                serde: if has_members {
                    SerdeImpl::Codec
                } else {
                    SerdeImpl::Derive
                },
                tagged: true,
            }),
            Item::TagTable(TagTable {
                owner: record.name.clone(),
                container,
                entries: family
                    .subtypes
                    .iter()
                    .map(|subtype| TagConst {
                        name: tag_const(&record.name, &subtype.tag),
                        tag: subtype.tag.clone(),
                    })
                    .collect(),
            }),
        ];

        if has_members {
            items.push(Item::Codec(
                UnionCodecGenerator::new(self.ctx).for_family(record, family)?,
            ));
        }
        Ok(items)
    }
}
