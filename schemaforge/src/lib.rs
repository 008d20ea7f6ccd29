//! # schemaforge
//!
//! Schema-driven Rust code generation with tagged-union JSON codecs.
//!
//! schemaforge turns a namespace/type graph of records and tagged unions into
//! one Rust source file per namespace: plain structs with constructors,
//! union containers with a string discriminator, and the serde
//! implementations that read and write them as JSON.
//!
//! ## Features
//!
//! - **Record structs** - Parents embedded and flattened, constructors taking
//!   every required field of the chain
//! - **Tagged unions** - Record payloads flattened next to the discriminator,
//!   every other payload nested under the variant name
//! - **Polymorphic families** - Interface traits so fields accept any member
//!   of a closed record family
//! - **Build script friendly** - Files written atomically and loadable with
//!   `include!`
//!
//! ## Quick Start
//!
//! ```ignore
//! use schemaforge::prelude::*;
//! use std::path::Path;
//!
//! let api = Api::from_file(Path::new("api.json"))?;
//! let config = GeneratorConfig::new().with_discriminator("tag");
//! Generator::with_config(&api, config).write_to(Path::new("src/generated"))?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime support used by generated code
//! - [`schema`] - Schema model, JSON loading and validation
//! - [`codegen`] - Rust code generation
//! - [`cli`] - The `schemaforge` command line tool

pub mod cli;
pub mod prelude;

/// Runtime support used by generated code.
pub mod core {
    pub use schemaforge_core::*;
}

/// Schema model, loading and validation.
pub mod schema {
    pub use schemaforge_schema::*;
}

/// Code generation from schemas.
pub mod codegen {
    pub use schemaforge_codegen::*;
}

// Re-export commonly used items at the crate root
pub use schemaforge_codegen::{CodegenError, GeneratedFile, Generator, GeneratorConfig};
pub use schemaforge_core::{EncodeError, Tagged, UnionEncoder};
pub use schemaforge_schema::{Api, SchemaError, validate_api};
