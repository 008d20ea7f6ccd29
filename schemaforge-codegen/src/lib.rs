//! # schemaforge Codegen
//!
//! Rust code generation from schemaforge schemas.
//!
//! This crate provides:
//! - One Rust source file per schema namespace
//! - Record structs with transitive constructors and declared defaults
//! - Tagged-union containers with flattened and nested JSON payloads
//! - Interface traits for closed polymorphic record families
//! - Atomic writing of generated files for build scripts and tools

pub mod collisions;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod ir;
pub mod naming;
pub mod output;
pub mod rust;

#[cfg(test)]
mod test_support;

use std::path::Path;

pub use config::{GeneratorConfig, Passthrough, UnknownTagPolicy};
pub use error::CodegenError;
pub use generator::{GeneratedFile, Generator};
pub use output::OutputDir;

/// Generates Rust code from a JSON schema document.
///
/// # Arguments
/// * `json` - Schema document
/// * `config` - Generator settings
///
/// # Returns
/// One generated file per namespace, in declaration order.
///
/// # Errors
/// Returns `CodegenError` if parsing, validation, or generation fails.
pub fn generate_from_json(
    json: &str,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let api = schemaforge_schema::parse_api(json)?;
    Generator::with_config(&api, config).generate_all()
}

/// Generates Rust code from a JSON schema file.
///
/// # Arguments
/// * `path` - Path to the schema document
/// * `config` - Generator settings
///
/// # Returns
/// One generated file per namespace, in declaration order.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, validation, or generation
/// fails.
pub fn generate_from_file(
    path: &Path,
    config: GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, config)
}
