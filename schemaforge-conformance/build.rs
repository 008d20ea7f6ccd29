//! Build script for schemaforge-conformance
//!
//! Generates the bindings of `schema/api.json` twice: once with unknown tags
//! preserved (plus the hand-maintained fragments) and once with unknown tags
//! rejected.

use std::env;
use std::path::PathBuf;

use schemaforge_codegen::{Generator, GeneratorConfig};
use schemaforge_schema::Api;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema = manifest_dir.join("schema").join("api.json");
    let fragment = manifest_dir.join("fragments").join("retry_hints.rs");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", schema.display());
    println!("cargo:rerun-if-changed={}", fragment.display());

    let api = Api::from_file(&schema)?;

    let lenient = GeneratorConfig::new()
        .with_discriminator("tag")
        .with_passthrough("errors", fragment);
    Generator::with_config(&api, lenient).write_to(&out_dir.join("lenient"))?;

    let strict = GeneratorConfig::new()
        .with_discriminator("tag")
        .reject_unknown_tags();
    Generator::with_config(&api, strict).write_to(&out_dir.join("strict"))?;

    Ok(())
}
