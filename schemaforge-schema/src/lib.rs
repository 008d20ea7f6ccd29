//! # schemaforge Schema
//!
//! Schema model and front-end boundary for schemaforge.
//!
//! This crate provides:
//! - The namespace/type graph consumed by the code generator
//! - JSON loading of pre-parsed schemas
//! - Schema validation (references, parent chains, tags, defaults)
//! - Builder helpers for constructing schemas in code

pub mod error;
pub mod parser;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{parse_api, parse_api_file};
pub use types::{
    Api, DataType, DefaultValue, Field, Namespace, PolymorphicFamily, PrimitiveType, Record,
    Subtype, TypeName, TypeRef, Union, Variant,
};
pub use validation::validate_api;
