//! Schema validation utilities.
//!
//! The generator assumes a well-formed schema. These checks run at the
//! front-end boundary, before generation, and reject references to unknown
//! types, looping parent chains, repeated tags and defaults that do not fit
//! their field.

use crate::error::SchemaError;
use crate::types::{Api, DataType, DefaultValue, Field, PrimitiveType, Record, TypeRef, Union};
use std::collections::HashSet;

/// Validates a schema for generation.
///
/// # Arguments
/// * `api` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the first issue found.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_api(api: &Api) -> Result<(), SchemaError> {
    validate_names(api)?;
    for namespace in &api.namespaces {
        for data_type in &namespace.data_types {
            match data_type {
                DataType::Record(record) => validate_record(api, record)?,
                DataType::Union(union) => validate_union(api, union)?,
            }
        }
    }
    Ok(())
}

/// Checks namespace and type names for duplicates.
fn validate_names(api: &Api) -> Result<(), SchemaError> {
    let mut namespaces = HashSet::new();
    for namespace in &api.namespaces {
        if !namespaces.insert(namespace.name.as_str()) {
            return Err(SchemaError::duplicate("namespace", &namespace.name));
        }
        let mut types = HashSet::new();
        for data_type in &namespace.data_types {
            if !types.insert(data_type.name()) {
                return Err(SchemaError::duplicate(
                    "type",
                    format!("{}.{}", namespace.name, data_type.name()),
                ));
            }
        }
    }
    Ok(())
}

/// Validates a record: parent chain, field references, field names,
/// defaults and family subtypes.
fn validate_record(api: &Api, record: &Record) -> Result<(), SchemaError> {
    let ancestors = api.ancestors(record)?;

    let mut seen = HashSet::new();
    for field in ancestors
        .iter()
        .flat_map(|r| r.fields.iter())
        .chain(record.fields.iter())
    {
        if !seen.insert(field.name.as_str()) {
            return Err(SchemaError::duplicate(
                "field",
                format!("{}.{}", record.name, field.name),
            ));
        }
    }

    for field in &record.fields {
        validate_type_ref(api, &field.type_ref, false)?;
        if let Some(default) = &field.default {
            validate_default(api, record, field, default)?;
        }
    }

    if let Some(family) = &record.family {
        let mut tags = HashSet::new();
        for subtype in &family.subtypes {
            if !tags.insert(subtype.tag.as_str()) {
                return Err(SchemaError::DuplicateTag {
                    owner: record.name.clone(),
                    tag: subtype.tag.clone(),
                });
            }
            let member = api.record(&subtype.record)?;
            let extends_base = member
                .parent
                .as_ref()
                .is_some_and(|p| p.name == record.name);
            if !extends_base {
                return Err(SchemaError::Validation {
                    message: format!(
                        "subtype '{}' of '{}' does not extend it",
                        subtype.record, record.name
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Validates a union: tag uniqueness and payload references.
fn validate_union(api: &Api, union: &Union) -> Result<(), SchemaError> {
    let mut tags = HashSet::new();
    for variant in &union.variants {
        if !tags.insert(variant.tag()) {
            return Err(SchemaError::DuplicateTag {
                owner: union.name.clone(),
                tag: variant.tag().to_string(),
            });
        }
        validate_type_ref(api, &variant.payload, true)?;
    }
    Ok(())
}

/// Validates that a type reference resolves.
fn validate_type_ref(api: &Api, type_ref: &TypeRef, allow_void: bool) -> Result<(), SchemaError> {
    match type_ref {
        TypeRef::Void if allow_void => Ok(()),
        TypeRef::Void => Err(SchemaError::Validation {
            message: "void is only allowed as a union variant payload".to_string(),
        }),
        TypeRef::Primitive(_) => Ok(()),
        TypeRef::Named(name) => api
            .lookup(name)
            .map(|_| ())
            .ok_or_else(|| SchemaError::not_found(name)),
        TypeRef::List(inner) => validate_type_ref(api, inner, false),
        TypeRef::Nullable(inner) if inner.is_nullable() => Err(SchemaError::Validation {
            message: "nested nullable types are not supported".to_string(),
        }),
        TypeRef::Nullable(inner) => validate_type_ref(api, inner, false),
    }
}

/// Validates that a default value matches its field's declared kind.
fn validate_default(
    api: &Api,
    record: &Record,
    field: &Field,
    default: &DefaultValue,
) -> Result<(), SchemaError> {
    let mismatch = |message: &str| SchemaError::invalid_default(&record.name, &field.name, message);

    match (&field.type_ref, default) {
        (TypeRef::Nullable(_), _) => Err(mismatch("nullable fields cannot carry a default")),
        (TypeRef::Primitive(p), DefaultValue::Bool(_)) if *p == PrimitiveType::Boolean => {
            Ok(())
        }
        (TypeRef::Primitive(p), DefaultValue::Integer(v)) if p.is_signed() || p.is_float() => {
            let fits = match p {
                PrimitiveType::Int32 => i32::try_from(*v).is_ok(),
                _ => true,
            };
            if fits {
                Ok(())
            } else {
                Err(mismatch("integer default out of range"))
            }
        }
        (TypeRef::Primitive(p), DefaultValue::Integer(v)) if p.is_unsigned() => {
            let fits = match p {
                PrimitiveType::UInt32 => u32::try_from(*v).is_ok(),
                _ => u64::try_from(*v).is_ok(),
            };
            if fits {
                Ok(())
            } else {
                Err(mismatch("integer default out of range"))
            }
        }
        (TypeRef::Primitive(p), DefaultValue::Float(v)) if p.is_float() => {
            if v.is_finite() {
                Ok(())
            } else {
                Err(mismatch("float default must be finite"))
            }
        }
        (TypeRef::Primitive(p), DefaultValue::String(_)) if p.is_text() => Ok(()),
        (TypeRef::Named(name), DefaultValue::Tag(tag)) => match api.lookup(name) {
            Some(DataType::Union(union)) => match union.get_variant(tag) {
                Some(variant) if variant.payload.is_void() => Ok(()),
                Some(_) => Err(mismatch("default tag must name a void variant")),
                None => Err(mismatch(&format!("unknown tag '{tag}'"))),
            },
            Some(DataType::Record(_)) => Err(mismatch("records cannot carry a default")),
            None => Err(SchemaError::not_found(name)),
        },
        _ => Err(mismatch("default does not match the field type")),
    }
}
