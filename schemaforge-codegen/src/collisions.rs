//! Identifier collision checks on lowered namespaces.
//!
//! Distinct schema names can map onto one Rust identifier: `accountId` and
//! `account_id` are both `account_id`, and the constant of variant
//! `rate_limit` of `Error` is the constant of variant `limit` of `ErrorRate`.
//! Such a unit would render into a file that does not compile, so it is
//! rejected before rendering.

use std::collections::HashSet;

use crate::error::CodegenError;
use crate::ir::{CodecArm, Constructor, Item, SourceUnit, StructDecl, UnionCodec};
use crate::naming::unraw;

/// Identifier of the tag field of union containers and codec envelopes.
const TAG_FIELD: &str = "tag";

/// Checks that every identifier of a unit is declared once in its scope.
///
/// Scopes are the types of the namespace (structs and interface traits), the
/// constants of the namespace, the fields of each struct, the parameters of
/// each constructor and the JSON keys read by each codec.
///
/// # Errors
/// Returns `CodegenError::Generation` naming the first identifier declared
/// twice.
pub fn check_unit(unit: &SourceUnit) -> Result<(), CodegenError> {
    let mut types = HashSet::new();
    let mut constants = HashSet::new();

    for item in &unit.items {
        match item {
            Item::Struct(decl) => {
                claim(&mut types, &decl.name, || {
                    format!(
                        "type '{}' is generated twice in namespace '{}'",
                        decl.name, unit.namespace
                    )
                })?;
                check_fields(decl)?;
            }
            Item::MarkerTrait(marker) => {
                claim(&mut types, &marker.trait_name, || {
                    format!(
                        "type '{}' is generated twice in namespace '{}'",
                        marker.trait_name, unit.namespace
                    )
                })?;
            }
            Item::TagTable(table) => {
                for entry in &table.entries {
                    claim(&mut constants, &entry.name, || {
                        format!(
                            "constant '{}' of '{}' is generated twice in namespace '{}'",
                            entry.name, table.owner, unit.namespace
                        )
                    })?;
                }
            }
            Item::Constructor(ctor) => check_params(ctor)?,
            Item::Codec(codec) => check_codec(codec)?,
        }
    }
    Ok(())
}

fn check_fields(decl: &StructDecl) -> Result<(), CodegenError> {
    let mut seen = HashSet::new();
    for field in &decl.fields {
        claim(&mut seen, &field.ident, || {
            format!(
                "field '{}' is generated twice in struct '{}'",
                unraw(&field.ident),
                decl.name
            )
        })?;
    }
    Ok(())
}

fn check_params(ctor: &Constructor) -> Result<(), CodegenError> {
    let mut seen = HashSet::new();
    for param in &ctor.params {
        claim(&mut seen, &param.ident, || {
            format!(
                "parameter '{}' is generated twice in the constructor of '{}'",
                unraw(&param.ident),
                ctor.type_name
            )
        })?;
    }
    Ok(())
}

/// Nested payloads are read from their own key next to the discriminator;
/// neither the key nor the envelope field may clash with the tag.
fn check_codec(codec: &UnionCodec) -> Result<(), CodegenError> {
    for arm in &codec.arms {
        let CodecArm::Nested { field, .. } = arm else {
            continue;
        };
        if field.wire_name == codec.discriminator {
            return Err(CodegenError::generation(format!(
                "payload key '{}' of '{}' collides with the discriminator",
                field.wire_name, codec.container
            )));
        }
        if unraw(&field.ident) == TAG_FIELD {
            return Err(CodegenError::generation(format!(
                "payload field '{}' of '{}' collides with the tag field",
                TAG_FIELD, codec.container
            )));
        }
    }
    Ok(())
}

fn claim<'a>(
    seen: &mut HashSet<&'a str>,
    ident: &'a str,
    message: impl FnOnce() -> String,
) -> Result<(), CodegenError> {
    if seen.insert(unraw(ident)) {
        Ok(())
    } else {
        Err(CodegenError::generation(message()))
    }
}
