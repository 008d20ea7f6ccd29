//! Schema model definitions.
//!
//! This module contains the immutable namespace/type graph handed over by the
//! front-end: namespaces, records, unions, fields, variants and type
//! references. Builder helpers allow schemas to be assembled in code.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complete schema: an ordered list of namespaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Api {
    /// Namespaces in declaration order.
    #[serde(default)]
    pub namespaces: Vec<Namespace>,
}

impl Api {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a namespace, builder style.
    #[must_use]
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.push(namespace);
        self
    }

    /// Looks up a namespace by name.
    #[must_use]
    pub fn get_namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    /// Looks up a data type by qualified name.
    #[must_use]
    pub fn lookup(&self, name: &TypeName) -> Option<&DataType> {
        self.get_namespace(&name.namespace)
            .and_then(|ns| ns.get_type(&name.name))
    }

    /// Looks up a record by qualified name.
    ///
    /// # Errors
    /// Returns `SchemaError` if the type is missing or is not a record.
    pub fn record(&self, name: &TypeName) -> Result<&Record, SchemaError> {
        match self.lookup(name) {
            Some(DataType::Record(record)) => Ok(record),
            Some(DataType::Union(_)) => Err(SchemaError::NotARecord {
                name: name.to_string(),
            }),
            None => Err(SchemaError::not_found(name)),
        }
    }

    /// Returns the ancestors of a record, root first, not including the
    /// record itself.
    ///
    /// # Errors
    /// Returns `SchemaError` if a parent is missing, is not a record, or the
    /// chain loops back on itself.
    pub fn ancestors<'a>(&'a self, record: &'a Record) -> Result<Vec<&'a Record>, SchemaError> {
        let mut chain: Vec<&Record> = Vec::new();
        let mut current = record;
        while let Some(parent) = &current.parent {
            let next = self.record(parent)?;
            if std::ptr::eq(next, record) || chain.iter().any(|r| std::ptr::eq(*r, next)) {
                let mut path: Vec<&str> = vec![record.name.as_str()];
                path.extend(chain.iter().map(|r| r.name.as_str()));
                path.push(next.name.as_str());
                return Err(SchemaError::CircularReference {
                    path: path.join(" -> "),
                });
            }
            chain.push(next);
            current = next;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Returns true if the named type is a record with enumerated subtypes.
    #[must_use]
    pub fn is_polymorphic(&self, name: &TypeName) -> bool {
        matches!(self.lookup(name), Some(DataType::Record(r)) if r.family.is_some())
    }
}

/// Named group of data types; one generated source file per namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace name.
    pub name: String,
    /// Documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Data types in declaration order.
    #[serde(default, rename = "types")]
    pub data_types: Vec<DataType>,
}

impl Namespace {
    /// Creates a new empty namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            data_types: Vec::new(),
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds a record.
    #[must_use]
    pub fn record(mut self, record: Record) -> Self {
        self.data_types.push(DataType::Record(record));
        self
    }

    /// Adds a union.
    #[must_use]
    pub fn union(mut self, union: Union) -> Self {
        self.data_types.push(DataType::Union(union));
        self
    }

    /// Looks up a data type by its unqualified name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&DataType> {
        self.data_types.iter().find(|dt| dt.name() == name)
    }

    /// Returns a qualified name for a type of this namespace.
    #[must_use]
    pub fn qualify(&self, name: impl Into<String>) -> TypeName {
        TypeName::new(self.name.clone(), name)
    }
}

/// A data type: either a record or an explicit tagged union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataType {
    /// Struct-like record.
    Record(Record),
    /// Explicit tagged union.
    Union(Union),
}

impl DataType {
    /// Returns the name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Record(r) => &r.name,
            Self::Union(u) => &u.name,
        }
    }

    /// Returns the documentation of the type.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        match self {
            Self::Record(r) => r.doc.as_deref(),
            Self::Union(u) => u.doc.as_deref(),
        }
    }

    /// Returns true if this is a record.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Returns true if this is a union.
    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

/// Record type with an optional parent and an optional closed family of
/// subtypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Type name.
    pub name: String,
    /// Documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Single parent, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TypeName>,
    /// Own fields in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Enumerated subtypes making this record a closed polymorphic family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<PolymorphicFamily>,
}

impl Record {
    /// Creates a new record without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets the parent record.
    #[must_use]
    pub fn parent(mut self, parent: TypeName) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends an enumerated subtype, turning this record into a family.
    #[must_use]
    pub fn subtype(mut self, tag: impl Into<String>, record: TypeName) -> Self {
        self.family
            .get_or_insert_with(PolymorphicFamily::default)
            .subtypes
            .push(Subtype {
                tag: tag.into(),
                record,
            });
        self
    }

    /// Returns own fields that must be supplied by a constructor.
    pub fn required_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_required())
    }

    /// Returns own fields that are optional.
    pub fn optional_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| !f.is_required())
    }
}

/// Closed set of subtypes attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolymorphicFamily {
    /// Subtypes in declaration order.
    pub subtypes: Vec<Subtype>,
}

/// One enumerated subtype of a polymorphic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtype {
    /// Wire tag (also the variant name).
    pub tag: String,
    /// The subtype record.
    pub record: TypeName,
}

/// Explicit tagged union.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Union {
    /// Type name.
    pub name: String,
    /// Documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Variants in declaration order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Union {
    /// Creates a new union without variants.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a variant.
    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Looks up a variant by tag.
    #[must_use]
    pub fn get_variant(&self, tag: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.tag() == tag)
    }

    /// Returns true if every variant is void.
    #[must_use]
    pub fn is_all_void(&self) -> bool {
        self.variants.iter().all(|v| v.payload.is_void())
    }
}

/// Record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name (wire name).
    pub name: String,
    /// Documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Declared type, including nullability.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Declared default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
}

impl Field {
    /// Creates a field without default.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            doc: None,
            type_ref,
            default: None,
        }
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Returns true if the field has no default and is not nullable.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.type_ref.is_nullable()
    }
}

/// Union variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant name (field name of its payload).
    pub name: String,
    /// Explicit wire tag; the name is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Payload type; `Void` for tag-only variants.
    #[serde(default, rename = "type")]
    pub payload: TypeRef,
}

impl Variant {
    /// Creates a variant with a payload.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: TypeRef) -> Self {
        Self {
            name: name.into(),
            tag: None,
            doc: None,
            payload,
        }
    }

    /// Creates a tag-only variant.
    #[must_use]
    pub fn void(name: impl Into<String>) -> Self {
        Self::new(name, TypeRef::Void)
    }

    /// Overrides the wire tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the documentation.
    #[must_use]
    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Returns the wire tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.tag.as_deref().unwrap_or(&self.name)
    }
}

/// Qualified reference to a named data type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
    /// Owning namespace.
    pub namespace: String,
    /// Type name within the namespace.
    pub name: String,
}

impl TypeName {
    /// Creates a qualified type name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Reference to a type from a field or variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// No payload (union variants only).
    #[default]
    Void,
    /// Built-in primitive.
    Primitive(PrimitiveType),
    /// Record or union declared in some namespace.
    Named(TypeName),
    /// Homogeneous list.
    List(Box<TypeRef>),
    /// Nullable wrapper.
    Nullable(Box<TypeRef>),
}

impl TypeRef {
    /// Creates a named reference.
    #[must_use]
    pub fn named(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(TypeName::new(namespace, name))
    }

    /// Wraps a reference in a list.
    #[must_use]
    pub fn list(inner: TypeRef) -> Self {
        Self::List(Box::new(inner))
    }

    /// Wraps a reference in a nullable marker.
    #[must_use]
    pub fn nullable(inner: TypeRef) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Returns true for `Void`.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns true for nullable references.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Nullable(_))
    }

    /// Returns the reference with one nullable layer removed.
    #[must_use]
    pub fn strip_nullable(&self) -> &TypeRef {
        match self {
            Self::Nullable(inner) => inner,
            other => other,
        }
    }

    /// Returns the named type, looking through a nullable marker.
    #[must_use]
    pub fn as_named(&self) -> Option<&TypeName> {
        match self.strip_nullable() {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }
}

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    /// Boolean.
    Boolean,
    /// UTF-8 string.
    String,
    /// Raw bytes.
    Bytes,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 32-bit integer.
    #[serde(rename = "uint32")]
    UInt32,
    /// Unsigned 64-bit integer.
    #[serde(rename = "uint64")]
    UInt64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// Timestamp carried as RFC 3339 text.
    Timestamp,
}

impl PrimitiveType {
    /// Returns the Rust type for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Boolean => "bool",
            Self::String | Self::Timestamp => "String",
            Self::Bytes => "Vec<u8>",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::UInt32 => "u32",
            Self::UInt64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }

    /// Returns the schema name.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Timestamp => "timestamp",
        }
    }

    /// Parses a primitive type from its schema name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "boolean" => Some(Self::Boolean),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint32" => Some(Self::UInt32),
            "uint64" => Some(Self::UInt64),
            "float32" => Some(Self::Float32),
            "float64" => Some(Self::Float64),
            "timestamp" => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Returns true if this is a signed integer type.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    /// Returns true if this is an unsigned integer type.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::UInt32 | Self::UInt64)
    }

    /// Returns true if this is a floating point type.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if values are carried as text.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::String | Self::Timestamp)
    }
}

/// Declared default value of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultValue {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal.
    String(String),
    /// Tag of a void variant of the field's union type.
    Tag(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account_api() -> Api {
        Api::new().namespace(
            Namespace::new("users")
                .record(
                    Record::new("Account")
                        .field(Field::new(
                            "account_id",
                            TypeRef::Primitive(PrimitiveType::String),
                        ))
                        .subtype("basic", TypeName::new("users", "BasicAccount")),
                )
                .record(
                    Record::new("BasicAccount")
                        .parent(TypeName::new("users", "Account"))
                        .field(Field::new(
                            "is_teammate",
                            TypeRef::Primitive(PrimitiveType::Boolean),
                        )),
                )
                .record(
                    Record::new("TeamAccount")
                        .parent(TypeName::new("users", "BasicAccount"))
                        .field(Field::new(
                            "team_id",
                            TypeRef::nullable(TypeRef::Primitive(PrimitiveType::String)),
                        )),
                )
                .union(Union::new("AccountType").variant(Variant::void("basic"))),
        )
    }

    #[test]
    fn test_lookup() {
        let api = account_api();
        let name = TypeName::new("users", "AccountType");
        assert!(api.lookup(&name).is_some_and(DataType::is_union));
        assert!(api.lookup(&TypeName::new("users", "Missing")).is_none());
        assert!(api.lookup(&TypeName::new("teams", "Account")).is_none());
    }

    #[test]
    fn test_record_lookup_rejects_union() {
        let api = account_api();
        let result = api.record(&TypeName::new("users", "AccountType"));
        assert!(matches!(result, Err(SchemaError::NotARecord { .. })));
    }

    #[test]
    fn test_ancestors_root_first() {
        let api = account_api();
        let team = api
            .record(&TypeName::new("users", "TeamAccount"))
            .expect("record");
        let names: Vec<&str> = api
            .ancestors(team)
            .expect("chain")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Account", "BasicAccount"]);
    }

    #[test]
    fn test_ancestors_detects_cycle() {
        let api = Api::new().namespace(
            Namespace::new("loop")
                .record(Record::new("A").parent(TypeName::new("loop", "B")))
                .record(Record::new("B").parent(TypeName::new("loop", "A"))),
        );
        let a = api.record(&TypeName::new("loop", "A")).expect("record");
        assert!(matches!(
            api.ancestors(a),
            Err(SchemaError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_is_polymorphic() {
        let api = account_api();
        assert!(api.is_polymorphic(&TypeName::new("users", "Account")));
        assert!(!api.is_polymorphic(&TypeName::new("users", "BasicAccount")));
    }

    #[test]
    fn test_field_required() {
        let plain = Field::new("a", TypeRef::Primitive(PrimitiveType::Int32));
        assert!(plain.is_required());

        let nullable = Field::new(
            "b",
            TypeRef::nullable(TypeRef::Primitive(PrimitiveType::Int32)),
        );
        assert!(!nullable.is_required());

        let defaulted = Field::new("c", TypeRef::Primitive(PrimitiveType::Boolean))
            .default_value(DefaultValue::Bool(true));
        assert!(!defaulted.is_required());
    }

    #[test]
    fn test_variant_tag_defaults_to_name() {
        assert_eq!(Variant::void("invalid_arg").tag(), "invalid_arg");
        assert_eq!(Variant::void("other").with_tag("x-other").tag(), "x-other");
    }

    #[test]
    fn test_primitive_names_roundtrip() {
        for prim in [
            PrimitiveType::Boolean,
            PrimitiveType::String,
            PrimitiveType::Bytes,
            PrimitiveType::Int32,
            PrimitiveType::Int64,
            PrimitiveType::UInt32,
            PrimitiveType::UInt64,
            PrimitiveType::Float32,
            PrimitiveType::Float64,
            PrimitiveType::Timestamp,
        ] {
            assert_eq!(PrimitiveType::from_schema_name(prim.schema_name()), Some(prim));
        }
        assert_eq!(PrimitiveType::from_schema_name("decimal"), None);
    }

    #[test]
    fn test_strip_nullable() {
        let inner = TypeRef::named("users", "Name");
        let wrapped = TypeRef::nullable(inner.clone());
        assert_eq!(wrapped.strip_nullable(), &inner);
        assert_eq!(
            wrapped.as_named(),
            Some(&TypeName::new("users", "Name"))
        );
        assert!(TypeRef::Void.as_named().is_none());
    }
}
