//! # schemaforge Core
//!
//! Runtime support for code generated by schemaforge.
//!
//! This crate provides:
//! - The [`Tagged`] trait implemented by every generated union container
//! - [`UnionEncoder`] for writing flattened and nested union payloads
//! - Decode helpers used by generated two-phase union decoders
//! - Error types for encoding operations
//!
//! Generated sources reference this crate by path, so it has to be a
//! dependency of any crate that includes them, next to `serde` (with the
//! `derive` feature) and `serde_json`.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod tagged;

pub use decoder::{decode_value, discriminator};
pub use encoder::{UnionEncoder, encode_value};
pub use error::{EncodeError, Result};
pub use tagged::Tagged;
