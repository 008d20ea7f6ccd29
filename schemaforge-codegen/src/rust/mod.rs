//! Rust code generation modules.

pub mod codec;
pub mod fields;
pub mod render;
pub mod resolver;
pub mod structs;
pub mod unions;

pub use codec::UnionCodecGenerator;
pub use fields::FieldEmitter;
pub use render::Renderer;
pub use resolver::TypeResolver;
pub use structs::StructEmitter;
pub use unions::UnionEmitter;
