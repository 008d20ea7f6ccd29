//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use schemaforge::prelude::*;
//! ```

// Runtime types
pub use schemaforge_core::{EncodeError, Tagged, UnionEncoder, decode_value, encode_value};

// Schema types
pub use schemaforge_schema::{
    Api, DataType, DefaultValue, Field, Namespace, ParseError, PrimitiveType, Record,
    SchemaError, TypeName, TypeRef, Union, Variant, validate_api,
};

// Codegen types
pub use schemaforge_codegen::{
    CodegenError, GeneratedFile, Generator, GeneratorConfig, OutputDir, UnknownTagPolicy,
};
