//! Record struct and constructor generation.

use schemaforge_schema::{DataType, DefaultValue, Field, Record, TypeRef};
use tracing::debug;

use crate::context::NamespaceContext;
use crate::error::CodegenError;
use crate::ir::{Assignment, Constructor, Item, Param, SerdeImpl, StructDecl, ValueExpr};
use crate::naming::{field_ident, type_ident};
use crate::rust::FieldEmitter;

/// Generator for record structs.
pub struct StructEmitter<'a> {
    ctx: NamespaceContext<'a>,
}

impl<'a> StructEmitter<'a> {
    /// Creates a new struct emitter.
    #[must_use]
    pub fn new(ctx: NamespaceContext<'a>) -> Self {
        Self { ctx }
    }

    /// Emits the struct and constructor of a record.
    ///
    /// A parent is embedded as the first field and flattened into the JSON
    /// object; own fields follow in declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field type or the parent cannot be
    /// resolved.
    pub fn emit(&self, record: &Record) -> Result<Vec<Item>, CodegenError> {
        debug!("Emitting record {}.{}", self.ctx.name(), record.name);
        let fields = FieldEmitter::new(self.ctx);

        let mut decls = Vec::with_capacity(record.fields.len() + 1);
        if let Some(parent) = &record.parent {
            decls.push(fields.emit_parent(parent, &record.name)?);
        }
        for field in &record.fields {
            decls.push(fields.emit(field)?);
        }

        let decl = StructDecl {
            name: type_ident(&record.name),
            doc: record.doc.clone(),
            fields: decls,
            serde: SerdeImpl::Derive,
            tagged: false,
        };

        Ok(vec![
            Item::Struct(decl),
            Item::Constructor(self.constructor(record)?),
        ])
    }

    /// Builds the constructor of a record.
    ///
    /// Every required field of the record and its ancestors becomes a
    /// parameter, root ancestor first. Optional fields with a default are
    /// assigned after all parameters.
    ///
    /// # Errors
    /// Returns `CodegenError` if the parent chain is broken or a default does
    /// not fit its field.
    pub fn constructor(&self, record: &Record) -> Result<Constructor, CodegenError> {
        let mut levels = self.ctx.api.ancestors(record)?;
        levels.push(record);

        // Level i is reached through the parent fields of levels n-1 down to i.
        let paths: Vec<Vec<String>> = (0..levels.len())
            .map(|i| {
                levels[i..levels.len() - 1]
                    .iter()
                    .rev()
                    .map(|level| field_ident(&level.name))
                    .collect()
            })
            .collect();

        let resolver = self.ctx.resolver();
        let mut params = Vec::new();
        let mut assignments = Vec::new();

        for (level, path) in levels.iter().zip(&paths) {
            for field in level.required_fields() {
                let ident = field_ident(&field.name);
                params.push(Param {
                    ident: ident.clone(),
                    ty: resolver.resolve(&field.type_ref, true, &field.name)?,
                });
                assignments.push(Assignment {
                    path: with_field(path, &ident),
                    value: ValueExpr::Param(ident),
                });
            }
        }

        for (level, path) in levels.iter().zip(&paths) {
            for field in level.optional_fields() {
                if let Some(default) = &field.default {
                    assignments.push(Assignment {
                        path: with_field(path, &field_ident(&field.name)),
                        value: self.default_value(level, field, default)?,
                    });
                }
            }
        }

        Ok(Constructor {
            type_name: type_ident(&record.name),
            params,
            assignments,
        })
    }

    /// Lowers a declared default into a literal of the field's type.
    fn default_value(
        &self,
        record: &Record,
        field: &Field,
        default: &DefaultValue,
    ) -> Result<ValueExpr, CodegenError> {
        let mismatch = || {
            CodegenError::generation(format!(
                "default of field '{}.{}' does not match its type",
                record.name, field.name
            ))
        };

        match (&field.type_ref, default) {
            (TypeRef::Primitive(_), DefaultValue::Bool(value)) => Ok(ValueExpr::Bool(*value)),
            (TypeRef::Primitive(p), DefaultValue::Integer(value)) if p.is_float() => {
                Ok(ValueExpr::Float(*value as f64))
            }
            (TypeRef::Primitive(_), DefaultValue::Integer(value)) => {
                Ok(ValueExpr::Integer(*value))
            }
            (TypeRef::Primitive(_), DefaultValue::Float(value)) if value.is_finite() => {
                Ok(ValueExpr::Float(*value))
            }
            (TypeRef::Primitive(_), DefaultValue::String(value)) => {
                Ok(ValueExpr::Str(value.clone()))
            }
            (TypeRef::Named(name), DefaultValue::Tag(tag)) => {
                let resolver = self.ctx.resolver();
                match resolver.lookup(name, &field.name)? {
                    DataType::Union(union) => {
                        let variant = union.get_variant(tag).ok_or_else(mismatch)?;
                        Ok(ValueExpr::UnionTag {
                            ty: resolver.named(name, &field.name)?,
                            tag: variant.tag().to_string(),
                            has_payload: !union.is_all_void(),
                        })
                    }
                    DataType::Record(_) => Err(mismatch()),
                }
            }
            _ => Err(mismatch()),
        }
    }
}

fn with_field(path: &[String], field: &str) -> Vec<String> {
    let mut path = path.to_vec();
    path.push(field.to_string());
    path
}
