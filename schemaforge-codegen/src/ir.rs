//! Intermediate representation of generated declarations.
//!
//! Emitters lower schema definitions into these items; the renderer turns
//! them into Rust tokens. Nothing here knows about token streams, which keeps
//! emitter tests readable.

use std::fmt;

use schemaforge_schema::PrimitiveType;

use crate::config::UnknownTagPolicy;

/// A Rust type expression in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Primitive type.
    Primitive(PrimitiveType),
    /// Generated struct, qualified by module when it lives elsewhere.
    Named {
        /// Module of the type, `None` within the same namespace.
        module: Option<String>,
        /// Type identifier.
        name: String,
    },
    /// Trait object of a family interface.
    Dyn {
        /// Module of the trait, `None` within the same namespace.
        module: Option<String>,
        /// Trait identifier.
        name: String,
    },
    /// `Box<T>`.
    Boxed(Box<TypeExpr>),
    /// `Option<T>`.
    Optional(Box<TypeExpr>),
    /// `Vec<T>`.
    List(Box<TypeExpr>),
}

impl TypeExpr {
    /// Wraps this type in `Box`.
    #[must_use]
    pub fn boxed(self) -> Self {
        Self::Boxed(Box::new(self))
    }

    /// Wraps this type in `Option`.
    #[must_use]
    pub fn optional(self) -> Self {
        Self::Optional(Box::new(self))
    }

    /// Wraps this type in `Vec`.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Boxes generated types; other types are returned unchanged.
    #[must_use]
    pub fn boxed_if_named(self) -> Self {
        match self {
            Self::Named { .. } => self.boxed(),
            other => other,
        }
    }

    /// Returns true for `Option<T>`.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Returns the type inside `Option`, or the type itself.
    #[must_use]
    pub fn strip_optional(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => f.write_str(primitive.rust_type()),
            Self::Named { module, name } => match module {
                Some(module) => write!(f, "super::{module}::{name}"),
                None => f.write_str(name),
            },
            Self::Dyn { module, name } => match module {
                Some(module) => write!(f, "dyn super::{module}::{name}"),
                None => write!(f, "dyn {name}"),
            },
            Self::Boxed(inner) => write!(f, "Box<{inner}>"),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::List(inner) => write!(f, "Vec<{inner}>"),
        }
    }
}

/// How a struct field maps onto its JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// Written under its wire name.
    Plain,
    /// Omitted when empty and read as empty when absent.
    OmitWhenAbsent,
    /// Always written; read as the zero value when absent.
    DefaultWhenAbsent,
    /// Keys merged into the enclosing object.
    Flatten,
}

/// A struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Rust identifier, possibly raw.
    pub ident: String,
    /// JSON key.
    pub wire_name: String,
    /// Field type.
    pub ty: TypeExpr,
    /// Documentation.
    pub doc: Option<String>,
    /// JSON mapping.
    pub encoding: FieldEncoding,
}

impl FieldDecl {
    /// Returns true if the JSON key differs from the identifier.
    #[must_use]
    pub fn needs_rename(&self) -> bool {
        crate::naming::unraw(&self.ident) != self.wire_name
    }
}

/// Where the serde implementations of a struct come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerdeImpl {
    /// Derived.
    Derive,
    /// Written out by a [`UnionCodec`].
    Codec,
}

/// A generated struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    /// Type identifier.
    pub name: String,
    /// Documentation.
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>,
    /// Source of the serde implementations.
    pub serde: SerdeImpl,
    /// Whether the struct is a union container with a `tag` field.
    pub tagged: bool,
}

/// A value assigned by a constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// Constructor parameter.
    Param(String),
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Union value holding a void variant.
    UnionTag {
        /// Union type.
        ty: TypeExpr,
        /// Tag of the variant.
        tag: String,
        /// Whether the union has payload fields to default.
        has_payload: bool,
    },
}

/// One statement of a constructor body.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Field path from the constructed value, composed parents first.
    pub path: Vec<String>,
    /// Assigned value.
    pub value: ValueExpr,
}

/// A constructor parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    /// Parameter identifier.
    pub ident: String,
    /// Parameter type.
    pub ty: TypeExpr,
}

/// The `new` function of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructor {
    /// Constructed type.
    pub type_name: String,
    /// Required fields, root ancestor first.
    pub params: Vec<Param>,
    /// Parameter and default assignments.
    pub assignments: Vec<Assignment>,
}

/// A tag constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagConst {
    /// Constant identifier.
    pub name: String,
    /// Tag value.
    pub tag: String,
}

/// Tag constants of a union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTable {
    /// Union name the constants are named after.
    pub owner: String,
    /// Container that receives the `TAGS` list.
    pub container: String,
    /// Constants in declaration order.
    pub entries: Vec<TagConst>,
}

/// Interface trait of a polymorphic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTrait {
    /// Trait identifier.
    pub trait_name: String,
    /// Base record identifier.
    pub base: String,
    /// Suffix of the trait methods.
    pub method_suffix: String,
    /// Discriminator key.
    pub discriminator: String,
    /// Subtypes with the constant naming their tag.
    pub members: Vec<(TypeExpr, String)>,
    /// Handling of unknown discriminators.
    pub unknown_tags: UnknownTagPolicy,
}

/// A variant payload field of a union container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    /// Field identifier.
    pub ident: String,
    /// Key of the nested payload.
    pub wire_name: String,
    /// Payload type, without the `Option` of the container field.
    pub ty: TypeExpr,
}

/// Payload treatment of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// No payload.
    Void,
    /// Record keys merged next to the discriminator.
    Flattened,
    /// Payload stored under the variant's field name.
    Nested,
}

/// Codec behaviour for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecArm {
    /// Tag without payload.
    Void {
        /// Tag constant.
        tag_const: String,
    },
    /// Flattened record payload.
    Flattened {
        /// Tag constant.
        tag_const: String,
        /// Payload field.
        field: PayloadField,
    },
    /// Nested payload.
    Nested {
        /// Tag constant.
        tag_const: String,
        /// Payload field.
        field: PayloadField,
        /// Whether the payload may be absent.
        nullable: bool,
    },
}

impl CodecArm {
    /// Returns the constant naming the tag of this arm.
    #[must_use]
    pub fn tag_const(&self) -> &str {
        match self {
            Self::Void { tag_const }
            | Self::Flattened { tag_const, .. }
            | Self::Nested { tag_const, .. } => tag_const,
        }
    }

    /// Returns the payload kind of this arm.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Void { .. } => PayloadKind::Void,
            Self::Flattened { .. } => PayloadKind::Flattened,
            Self::Nested { .. } => PayloadKind::Nested,
        }
    }
}

/// Custom serde implementations of a union container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionCodec {
    /// Container identifier.
    pub container: String,
    /// Discriminator key.
    pub discriminator: String,
    /// One arm per tag, in declaration order.
    pub arms: Vec<CodecArm>,
    /// Handling of unknown discriminators.
    pub unknown_tags: UnknownTagPolicy,
}

/// A top-level item of a generated file.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Struct declaration.
    Struct(StructDecl),
    /// Record constructor.
    Constructor(Constructor),
    /// Tag constants.
    TagTable(TagTable),
    /// Family interface and its implementations.
    MarkerTrait(MarkerTrait),
    /// Union serde implementations.
    Codec(UnionCodec),
}

/// Everything generated for one namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceUnit {
    /// Namespace name.
    pub namespace: String,
    /// Namespace documentation.
    pub doc: Option<String>,
    /// Items in emission order.
    pub items: Vec<Item>,
}

impl SourceUnit {
    /// Returns the struct declaration named `name`.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDecl> {
        self.items.iter().find_map(|item| match item {
            Item::Struct(decl) if decl.name == name => Some(decl),
            _ => None,
        })
    }

    /// Returns the constructor of `name`.
    #[must_use]
    pub fn get_constructor(&self, name: &str) -> Option<&Constructor> {
        self.items.iter().find_map(|item| match item {
            Item::Constructor(ctor) if ctor.type_name == name => Some(ctor),
            _ => None,
        })
    }

    /// Returns the codec of the container `name`.
    #[must_use]
    pub fn get_codec(&self, name: &str) -> Option<&UnionCodec> {
        self.items.iter().find_map(|item| match item {
            Item::Codec(codec) if codec.container == name => Some(codec),
            _ => None,
        })
    }
}
