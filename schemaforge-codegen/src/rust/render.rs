//! Lowering of generated items into Rust source text.
//!
//! Items are quasi-quoted with [`quote`], checked by parsing them back with
//! [`syn`], and formatted with [`prettyplease`]. Generated files carry no
//! inner attributes so they can be pulled in with `include!`.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};
use schemaforge_schema::PrimitiveType;

use crate::config::{GeneratorConfig, UnknownTagPolicy};
use crate::error::CodegenError;
use crate::ir::{
    CodecArm, Constructor, FieldDecl, FieldEncoding, Item, MarkerTrait, SerdeImpl, SourceUnit,
    StructDecl, TagTable, TypeExpr, UnionCodec, ValueExpr,
};

/// Constructors with more parameters than this get a clippy allowance.
const MAX_PLAIN_ARGUMENTS: usize = 7;

/// Renders source units into formatted Rust.
#[derive(Debug, Clone)]
pub struct Renderer {
    runtime: TokenStream,
    header: Option<String>,
}

impl Renderer {
    /// Creates a renderer for the given configuration.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the runtime crate path is not a
    /// valid Rust path.
    pub fn new(config: &GeneratorConfig) -> Result<Self, CodegenError> {
        Ok(Self {
            runtime: runtime_path(&config.runtime_crate)?,
            header: config.header.clone(),
        })
    }

    /// Renders a source unit to formatted Rust source.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if the emitted tokens do not parse
    /// as a Rust file.
    pub fn render_unit(&self, unit: &SourceUnit) -> Result<String, CodegenError> {
        let items: Vec<TokenStream> = unit
            .items
            .iter()
            .map(|item| self.render_item(item))
            .collect();
        let tokens = quote! { #(#items)* };
        let file = syn::parse2::<syn::File>(tokens).map_err(|e| {
            CodegenError::generation(format!(
                "namespace '{}' produced invalid Rust: {e}",
                unit.namespace
            ))
        })?;
        Ok(format!(
            "{}{}",
            self.file_header(unit),
            prettyplease::unparse(&file)
        ))
    }

    /// Renders one item to tokens.
    #[must_use]
    pub fn render_item(&self, item: &Item) -> TokenStream {
        match item {
            Item::Struct(decl) => self.render_struct(decl),
            Item::Constructor(ctor) => render_constructor(ctor),
            Item::TagTable(table) => render_tag_table(table),
            Item::MarkerTrait(marker) => self.render_marker_trait(marker),
            Item::Codec(codec) => self.render_codec(codec),
        }
    }

    fn file_header(&self, unit: &SourceUnit) -> String {
        let mut header = String::from("// Code generated by schemaforge. DO NOT EDIT.\n");
        header.push_str(&format!("// Namespace: {}\n", unit.namespace));
        if let Some(extra) = &self.header {
            for line in extra.lines() {
                header.push_str(&format!("// {line}\n"));
            }
        }
        if let Some(doc) = &unit.doc {
            header.push_str("//\n");
            for line in doc.lines() {
                header.push_str(&format!("// {line}\n"));
            }
        }
        header.push('\n');
        header
    }

    fn render_struct(&self, decl: &StructDecl) -> TokenStream {
        let name = ident(&decl.name);
        let docs = doc_attrs(decl.doc.as_deref());
        let derive_serde = decl.serde == SerdeImpl::Derive;
        let derives = if derive_serde {
            quote! {
                #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
            }
        } else {
            quote! { #[derive(Debug, Clone, Default, PartialEq)] }
        };
        let fields = decl.fields.iter().map(|f| render_field(f, derive_serde));

        let tagged = decl.tagged.then(|| {
            let rt = &self.runtime;
            quote! {
                impl #rt::Tagged for #name {
                    fn tag(&self) -> &str {
                        &self.tag
                    }
                }
            }
        });

        quote! {
            #docs
            #derives
            pub struct #name {
                #(#fields)*
            }

            #tagged
        }
    }

    fn render_marker_trait(&self, marker: &MarkerTrait) -> TokenStream {
        let rt = &self.runtime;
        let trait_name = ident(&marker.trait_name);
        let base = ident(&marker.base);
        let key = &marker.discriminator;
        let encode = format_ident!("encode_{}", marker.method_suffix);
        let clone = format_ident!("clone_{}", marker.method_suffix);
        let trait_doc = format!(
            " Implemented by `{}` and every member of its family.",
            marker.base
        );

        let member_impls = marker.members.iter().map(|(ty, tag_const)| {
            let ty = type_tokens(ty);
            let tag = ident(tag_const);
            quote! {
                impl #trait_name for #ty {
                    fn #encode(&self) -> #rt::Result<::serde_json::Value> {
                        let mut encoder = #rt::UnionEncoder::new(#key, #tag);
                        encoder.flatten(self)?;
                        Ok(encoder.into_value())
                    }

                    fn #clone(&self) -> Box<dyn #trait_name> {
                        Box::new(::std::clone::Clone::clone(self))
                    }
                }
            }
        });

        let decode_arms = marker.members.iter().map(|(ty, tag_const)| {
            let ty = type_tokens(ty);
            let tag = ident(tag_const);
            quote! {
                Some(#tag) => Box::new(
                    #rt::decode_value::<#ty>(&body)
                        .map_err(<D::Error as ::serde::de::Error>::custom)?,
                ),
            }
        });
        let reject = (marker.unknown_tags == UnknownTagPolicy::Reject).then(|| {
            let tags = marker.members.iter().map(|(_, tag_const)| ident(tag_const));
            quote! {
                Some(other) => {
                    return Err(<D::Error as ::serde::de::Error>::unknown_variant(
                        other,
                        &[#(#tags),*],
                    ));
                }
            }
        });

        quote! {
            #[doc = #trait_doc]
            pub trait #trait_name: ::std::fmt::Debug {
                /// Encodes this value, with its discriminator when it is a subtype.
                fn #encode(&self) -> #rt::Result<::serde_json::Value>;

                /// Clones this value into a new box.
                fn #clone(&self) -> Box<dyn #trait_name>;
            }

            impl #trait_name for #base {
                fn #encode(&self) -> #rt::Result<::serde_json::Value> {
                    #rt::encode_value(self)
                }

                fn #clone(&self) -> Box<dyn #trait_name> {
                    Box::new(::std::clone::Clone::clone(self))
                }
            }

            #(#member_impls)*

            impl ::serde::Serialize for dyn #trait_name {
                fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                where
                    S: ::serde::Serializer,
                {
                    let value = self
                        .#encode()
                        .map_err(<S::Error as ::serde::ser::Error>::custom)?;
                    ::serde::Serialize::serialize(&value, serializer)
                }
            }

            impl<'de> ::serde::Deserialize<'de> for Box<dyn #trait_name> {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    let body = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                    let member: Box<dyn #trait_name> = match #rt::discriminator(&body, #key) {
                        #(#decode_arms)*
                        #reject
                        _ => Box::new(
                            #rt::decode_value::<#base>(&body)
                                .map_err(<D::Error as ::serde::de::Error>::custom)?,
                        ),
                    };
                    Ok(member)
                }
            }

            impl ::std::clone::Clone for Box<dyn #trait_name> {
                fn clone(&self) -> Self {
                    self.#clone()
                }
            }

            impl ::std::default::Default for Box<dyn #trait_name> {
                fn default() -> Self {
                    Box::new(<#base as ::std::default::Default>::default())
                }
            }

            impl ::std::cmp::PartialEq for Box<dyn #trait_name> {
                fn eq(&self, other: &Self) -> bool {
                    match (self.#encode(), other.#encode()) {
                        (Ok(left), Ok(right)) => left == right,
                        _ => false,
                    }
                }
            }

            // Derived PartialEq on a record holding a boxed member compares
            // through a reference.
            impl ::std::cmp::PartialEq<&Box<dyn #trait_name>> for Box<dyn #trait_name> {
                fn eq(&self, other: &&Box<dyn #trait_name>) -> bool {
                    match (self.#encode(), other.#encode()) {
                        (Ok(left), Ok(right)) => left == right,
                        _ => false,
                    }
                }
            }
        }
    }

    fn render_codec(&self, codec: &UnionCodec) -> TokenStream {
        let rt = &self.runtime;
        let name = ident(&codec.container);
        let key = &codec.discriminator;

        let encode_arms = codec.arms.iter().filter_map(|arm| match arm {
            CodecArm::Void { .. } => None,
            CodecArm::Flattened { tag_const, field } => {
                let tag = ident(tag_const);
                let field = ident(&field.ident);
                Some(quote! {
                    #tag => {
                        if let Some(payload) = &self.#field {
                            encoder
                                .flatten(payload)
                                .map_err(<S::Error as ::serde::ser::Error>::custom)?;
                        }
                    }
                })
            }
            CodecArm::Nested {
                tag_const, field, ..
            } => {
                let tag = ident(tag_const);
                let wire = &field.wire_name;
                let field = ident(&field.ident);
                Some(quote! {
                    #tag => {
                        if let Some(payload) = &self.#field {
                            encoder
                                .nest(#wire, payload)
                                .map_err(<S::Error as ::serde::ser::Error>::custom)?;
                        }
                    }
                })
            }
        });

        let placeholders = codec.arms.iter().filter_map(|arm| match arm {
            CodecArm::Nested { field, .. } => {
                let wire = &field.wire_name;
                let field = ident(&field.ident);
                Some(quote! {
                    #[serde(default, rename = #wire)]
                    #field: Option<::serde_json::Value>,
                })
            }
            _ => None,
        });

        let decode_arms = codec.arms.iter().map(|arm| match arm {
            CodecArm::Void { tag_const } => {
                let tag = ident(tag_const);
                quote! { #tag => {} }
            }
            CodecArm::Flattened { tag_const, field } => {
                let tag = ident(tag_const);
                let ty = type_tokens(&field.ty);
                let field = ident(&field.ident);
                quote! {
                    #tag => {
                        value.#field = Some(
                            #rt::decode_value::<#ty>(&body)
                                .map_err(<D::Error as ::serde::de::Error>::custom)?,
                        );
                    }
                }
            }
            CodecArm::Nested {
                tag_const,
                field,
                nullable: true,
            } => {
                let tag = ident(tag_const);
                let ty = type_tokens(&field.ty);
                let field = ident(&field.ident);
                quote! {
                    #tag => {
                        if let Some(raw) = envelope.#field {
                            value.#field = Some(
                                #rt::decode_value::<#ty>(&raw)
                                    .map_err(<D::Error as ::serde::de::Error>::custom)?,
                            );
                        }
                    }
                }
            }
            CodecArm::Nested {
                tag_const,
                field,
                nullable: false,
            } => {
                let tag = ident(tag_const);
                let ty = type_tokens(&field.ty);
                let wire = &field.wire_name;
                let field = ident(&field.ident);
                quote! {
                    #tag => match envelope.#field {
                        Some(raw) => {
                            value.#field = Some(
                                #rt::decode_value::<#ty>(&raw)
                                    .map_err(<D::Error as ::serde::de::Error>::custom)?,
                            );
                        }
                        None => {
                            return Err(<D::Error as ::serde::de::Error>::missing_field(#wire));
                        }
                    },
                }
            }
        });

        let fallback = match codec.unknown_tags {
            UnknownTagPolicy::Preserve => quote! { _ => {} },
            UnknownTagPolicy::Reject => {
                let tags = codec.arms.iter().map(|arm| ident(arm.tag_const()));
                quote! {
                    other => {
                        return Err(<D::Error as ::serde::de::Error>::unknown_variant(
                            other,
                            &[#(#tags),*],
                        ));
                    }
                }
            }
        };

        quote! {
            impl ::serde::Serialize for #name {
                fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
                where
                    S: ::serde::Serializer,
                {
                    let mut encoder = #rt::UnionEncoder::new(#key, &self.tag);
                    match self.tag.as_str() {
                        #(#encode_arms)*
                        _ => {}
                    }
                    encoder.finish(serializer)
                }
            }

            impl<'de> ::serde::Deserialize<'de> for #name {
                fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
                where
                    D: ::serde::Deserializer<'de>,
                {
                    #[derive(::serde::Deserialize)]
                    struct Envelope {
                        #[serde(rename = #key)]
                        tag: String,
                        #(#placeholders)*
                    }

                    let body = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                    let envelope: Envelope = #rt::decode_value(&body)
                        .map_err(<D::Error as ::serde::de::Error>::custom)?;
                    let mut value = Self {
                        tag: envelope.tag,
                        ..::std::default::Default::default()
                    };
                    match value.tag.as_str() {
                        #(#decode_arms)*
                        #fallback
                    }
                    Ok(value)
                }
            }
        }
    }
}

fn render_field(field: &FieldDecl, with_serde: bool) -> TokenStream {
    let name = ident(&field.ident);
    let ty = type_tokens(&field.ty);
    let docs = doc_attrs(field.doc.as_deref());
    let serde = if with_serde { serde_attr(field) } else { None };
    quote! {
        #docs
        #serde
        pub #name: #ty,
    }
}

fn serde_attr(field: &FieldDecl) -> Option<TokenStream> {
    let mut args = Vec::new();
    if field.encoding == FieldEncoding::Flatten {
        args.push(quote! { flatten });
    } else if field.needs_rename() {
        let wire = &field.wire_name;
        args.push(quote! { rename = #wire });
    }
    match field.encoding {
        FieldEncoding::OmitWhenAbsent => {
            args.push(quote! { default });
            args.push(quote! { skip_serializing_if = "Option::is_none" });
        }
        FieldEncoding::DefaultWhenAbsent => args.push(quote! { default }),
        FieldEncoding::Plain | FieldEncoding::Flatten => {}
    }
    (!args.is_empty()).then(|| quote! { #[serde(#(#args),*)] })
}

fn render_constructor(ctor: &Constructor) -> TokenStream {
    let name = ident(&ctor.type_name);
    let doc = format!(" Creates a new `{}` from its required fields.", ctor.type_name);
    let params = ctor.params.iter().map(|param| {
        let name = ident(&param.ident);
        let ty = type_tokens(&param.ty);
        quote! { #name: #ty }
    });
    let allow = (ctor.params.len() > MAX_PLAIN_ARGUMENTS)
        .then(|| quote! { #[allow(clippy::too_many_arguments)] });

    // `__value` cannot collide with a parameter; field identifiers never
    // start with two underscores.
    let body = if ctor.assignments.is_empty() {
        quote! { <Self as ::std::default::Default>::default() }
    } else {
        let statements = ctor.assignments.iter().map(|assignment| {
            let path = assignment.path.iter().map(|segment| ident(segment));
            let value = value_tokens(&assignment.value);
            quote! { __value.#(#path).* = #value; }
        });
        quote! {
            let mut __value = <Self as ::std::default::Default>::default();
            #(#statements)*
            __value
        }
    };

    quote! {
        impl #name {
            #[doc = #doc]
            #[must_use]
            #allow
            pub fn new(#(#params),*) -> Self {
                #body
            }
        }
    }
}

fn render_tag_table(table: &TagTable) -> TokenStream {
    let container = ident(&table.container);
    let consts = table.entries.iter().map(|entry| {
        let name = ident(&entry.name);
        let tag = &entry.tag;
        let doc = format!(" Tag of the `{}` variant of `{}`.", entry.tag, table.owner);
        quote! {
            #[doc = #doc]
            pub const #name: &str = #tag;
        }
    });
    let names = table.entries.iter().map(|entry| ident(&entry.name));

    quote! {
        #(#consts)*

        impl #container {
            /// Every tag of this union, in declaration order.
            pub const TAGS: &'static [&'static str] = &[#(#names),*];
        }
    }
}

fn value_tokens(value: &ValueExpr) -> TokenStream {
    match value {
        ValueExpr::Param(name) => {
            let name = ident(name);
            quote! { #name }
        }
        ValueExpr::Bool(value) => quote! { #value },
        ValueExpr::Integer(value) => {
            let literal = Literal::u64_unsuffixed(value.unsigned_abs());
            if *value < 0 {
                quote! { -#literal }
            } else {
                quote! { #literal }
            }
        }
        ValueExpr::Float(value) => {
            let literal = Literal::f64_unsuffixed(value.abs());
            if value.is_sign_negative() && *value != 0.0 {
                quote! { -#literal }
            } else {
                quote! { #literal }
            }
        }
        ValueExpr::Str(value) => quote! { String::from(#value) },
        ValueExpr::UnionTag {
            ty,
            tag,
            has_payload,
        } => {
            let ty = type_tokens(ty);
            let rest = has_payload.then(|| quote! { ..::std::default::Default::default() });
            quote! {
                #ty {
                    tag: String::from(#tag),
                    #rest
                }
            }
        }
    }
}

/// Returns the tokens of a type expression.
#[must_use]
pub fn type_tokens(ty: &TypeExpr) -> TokenStream {
    match ty {
        TypeExpr::Primitive(primitive) => primitive_tokens(*primitive),
        TypeExpr::Named { module, name } => qualified(module.as_deref(), name),
        TypeExpr::Dyn { module, name } => {
            let path = qualified(module.as_deref(), name);
            quote! { dyn #path }
        }
        TypeExpr::Boxed(inner) => {
            let inner = type_tokens(inner);
            quote! { Box<#inner> }
        }
        TypeExpr::Optional(inner) => {
            let inner = type_tokens(inner);
            quote! { Option<#inner> }
        }
        TypeExpr::List(inner) => {
            let inner = type_tokens(inner);
            quote! { Vec<#inner> }
        }
    }
}

fn primitive_tokens(primitive: PrimitiveType) -> TokenStream {
    match primitive {
        PrimitiveType::Boolean => quote! { bool },
        PrimitiveType::String | PrimitiveType::Timestamp => quote! { String },
        PrimitiveType::Bytes => quote! { Vec<u8> },
        PrimitiveType::Int32 => quote! { i32 },
        PrimitiveType::Int64 => quote! { i64 },
        PrimitiveType::UInt32 => quote! { u32 },
        PrimitiveType::UInt64 => quote! { u64 },
        PrimitiveType::Float32 => quote! { f32 },
        PrimitiveType::Float64 => quote! { f64 },
    }
}

fn qualified(module: Option<&str>, name: &str) -> TokenStream {
    let name = ident(name);
    match module {
        Some(module) => {
            let module = ident(module);
            quote! { super::#module::#name }
        }
        None => quote! { #name },
    }
}

/// Creates an identifier, honouring a `r#` prefix.
fn ident(text: &str) -> Ident {
    match text.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, Span::call_site()),
        None => Ident::new(text, Span::call_site()),
    }
}

fn doc_attrs(doc: Option<&str>) -> TokenStream {
    let Some(doc) = doc else {
        return TokenStream::new();
    };
    let lines = doc.lines().map(|line| {
        let line = if line.is_empty() {
            String::new()
        } else {
            format!(" {line}")
        };
        quote! { #[doc = #line] }
    });
    quote! { #(#lines)* }
}

fn runtime_path(path: &str) -> Result<TokenStream, CodegenError> {
    let first = path.split("::").next().unwrap_or_default();
    let text = if matches!(first, "" | "crate" | "self" | "super") {
        path.to_string()
    } else {
        format!("::{path}")
    };
    let parsed: syn::Path = syn::parse_str(&text).map_err(|e| {
        CodegenError::generation(format!("invalid runtime crate path '{path}': {e}"))
    })?;
    Ok(quote! { #parsed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Assignment, Param, PayloadField, TagConst};
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        Renderer::new(&GeneratorConfig::new().with_discriminator("tag")).expect("renderer")
    }

    fn render(items: Vec<Item>) -> String {
        renderer()
            .render_unit(&SourceUnit {
                namespace: "test".to_string(),
                doc: None,
                items,
            })
            .expect("render")
    }

    fn named(name: &str) -> TypeExpr {
        TypeExpr::Named {
            module: None,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_type_tokens() {
        let ty = TypeExpr::Named {
            module: Some("common".to_string()),
            name: "RetryPolicy".to_string(),
        }
        .boxed()
        .optional();
        assert_eq!(
            type_tokens(&ty).to_string(),
            "Option < Box < super :: common :: RetryPolicy > >"
        );
        let marker = TypeExpr::Dyn {
            module: None,
            name: "IsAccount".to_string(),
        }
        .boxed();
        assert_eq!(type_tokens(&marker).to_string(), "Box < dyn IsAccount >");
    }

    #[test]
    fn test_raw_ident() {
        assert_eq!(ident("r#type").to_string(), "r#type");
        assert_eq!(ident("limit").to_string(), "limit");
    }

    #[test]
    fn test_runtime_path() {
        assert_eq!(
            runtime_path("schemaforge_core").expect("path").to_string(),
            ":: schemaforge_core"
        );
        assert_eq!(
            runtime_path("crate::rt").expect("path").to_string(),
            "crate :: rt"
        );
        assert!(runtime_path("not a path").is_err());
    }

    #[test]
    fn test_render_record_struct() {
        let source = render(vec![Item::Struct(StructDecl {
            name: "RateLimitError".to_string(),
            doc: Some("Too many requests.".to_string()),
            fields: vec![
                FieldDecl {
                    ident: "limit".to_string(),
                    wire_name: "limit".to_string(),
                    ty: TypeExpr::Primitive(PrimitiveType::Int64),
                    doc: None,
                    encoding: FieldEncoding::Plain,
                },
                FieldDecl {
                    ident: "retry_after".to_string(),
                    wire_name: "retryAfter".to_string(),
                    ty: TypeExpr::Primitive(PrimitiveType::Int64).optional(),
                    doc: None,
                    encoding: FieldEncoding::OmitWhenAbsent,
                },
            ],
            serde: SerdeImpl::Derive,
            tagged: false,
        })]);

        assert!(source.starts_with("// Code generated by schemaforge. DO NOT EDIT.\n"));
        assert!(source.contains("/// Too many requests.\n"));
        assert!(source.contains("pub struct RateLimitError {"));
        assert!(source.contains("pub limit: i64,"));
        assert!(source.contains("rename = \"retryAfter\""));
        assert!(source.contains("skip_serializing_if = \"Option::is_none\""));
        assert!(source.contains("pub retry_after: Option<i64>,"));
    }

    #[test]
    fn test_render_constructor() {
        let source = render(vec![Item::Constructor(Constructor {
            type_name: "BasicAccount".to_string(),
            params: vec![Param {
                ident: "account_id".to_string(),
                ty: TypeExpr::Primitive(PrimitiveType::String),
            }],
            assignments: vec![
                Assignment {
                    path: vec!["account".to_string(), "account_id".to_string()],
                    value: ValueExpr::Param("account_id".to_string()),
                },
                Assignment {
                    path: vec!["account".to_string(), "r#type".to_string()],
                    value: ValueExpr::UnionTag {
                        ty: named("AccountType"),
                        tag: "basic".to_string(),
                        has_payload: false,
                    },
                },
                Assignment {
                    path: vec!["balance".to_string()],
                    value: ValueExpr::Integer(-5),
                },
            ],
        })]);

        assert!(source.contains("pub fn new(account_id: String) -> Self {"));
        assert!(source.contains("__value.account.account_id = account_id;"));
        assert!(source.contains("__value.account.r#type = AccountType"));
        assert!(source.contains("tag: String::from(\"basic\")"));
        assert!(!source.contains("..::std::default::Default::default()"));
        assert!(source.contains("__value.balance = -5;"));
        assert!(!source.contains("too_many_arguments"));
    }

    #[test]
    fn test_render_constructor_without_assignments() {
        let source = render(vec![Item::Constructor(Constructor {
            type_name: "Empty".to_string(),
            params: Vec::new(),
            assignments: Vec::new(),
        })]);
        assert!(source.contains("pub fn new() -> Self {"));
        assert!(source.contains("<Self as ::std::default::Default>::default()"));
        assert!(!source.contains("__value"));
    }

    #[test]
    fn test_render_many_arguments() {
        let params = (0..8)
            .map(|i| Param {
                ident: format!("f{i}"),
                ty: TypeExpr::Primitive(PrimitiveType::Int32),
            })
            .collect();
        let source = render(vec![Item::Constructor(Constructor {
            type_name: "Wide".to_string(),
            params,
            assignments: Vec::new(),
        })]);
        assert!(source.contains("#[allow(clippy::too_many_arguments)]"));
    }

    #[test]
    fn test_render_tag_table() {
        let source = render(vec![
            Item::Struct(StructDecl {
                name: "AccountType".to_string(),
                doc: None,
                fields: Vec::new(),
                serde: SerdeImpl::Derive,
                tagged: false,
            }),
            Item::TagTable(TagTable {
                owner: "AccountType".to_string(),
                container: "AccountType".to_string(),
                entries: vec![TagConst {
                    name: "ACCOUNT_TYPE_BASIC".to_string(),
                    tag: "basic".to_string(),
                }],
            }),
        ]);
        assert!(source.contains("pub const ACCOUNT_TYPE_BASIC: &str = \"basic\";"));
        assert!(source.contains("pub const TAGS: &'static [&'static str] = &[ACCOUNT_TYPE_BASIC];"));
    }

    #[test]
    fn test_render_codec() {
        let codec = UnionCodec {
            container: "Error".to_string(),
            discriminator: "tag".to_string(),
            arms: vec![
                CodecArm::Void {
                    tag_const: "ERROR_INVALID_ARG".to_string(),
                },
                CodecArm::Flattened {
                    tag_const: "ERROR_RATE_LIMIT".to_string(),
                    field: PayloadField {
                        ident: "rate_limit".to_string(),
                        wire_name: "rate_limit".to_string(),
                        ty: named("RateLimitError").boxed(),
                    },
                },
                CodecArm::Nested {
                    tag_const: "ERROR_RETRY".to_string(),
                    field: PayloadField {
                        ident: "retry".to_string(),
                        wire_name: "retry".to_string(),
                        ty: named("RetryPolicy").boxed(),
                    },
                    nullable: false,
                },
            ],
            unknown_tags: UnknownTagPolicy::Reject,
        };
        let source = render(vec![Item::Codec(codec)]);

        assert!(source.contains("impl ::serde::Serialize for Error {"));
        assert!(source.contains("::schemaforge_core::UnionEncoder::new(\"tag\", &self.tag);"));
        assert!(source.contains(".flatten(payload)"));
        assert!(source.contains(".nest(\"retry\", payload)"));
        assert!(source.contains("impl<'de> ::serde::Deserialize<'de> for Error {"));
        assert!(source.contains("struct Envelope {"));
        assert!(source.contains("#[serde(default, rename = \"retry\")]"));
        assert!(source.contains("retry: Option<::serde_json::Value>,"));
        assert!(source.contains("::schemaforge_core::decode_value::<Box<RateLimitError>>(&body)"));
        assert!(source.contains("missing_field("));
        assert!(source.contains("unknown_variant("));
        assert!(source.contains("ERROR_INVALID_ARG => {}"));
    }

    #[test]
    fn test_render_codec_struct_has_no_serde_attrs() {
        let source = render(vec![Item::Struct(StructDecl {
            name: "Error".to_string(),
            doc: None,
            fields: vec![FieldDecl {
                ident: "tag".to_string(),
                wire_name: "tag".to_string(),
                ty: TypeExpr::Primitive(PrimitiveType::String),
                doc: None,
                encoding: FieldEncoding::Plain,
            }],
            serde: SerdeImpl::Codec,
            tagged: true,
        })]);
        assert!(source.contains("#[derive(Debug, Clone, Default, PartialEq)]"));
        assert!(!source.contains("serde("));
        assert!(source.contains("impl ::schemaforge_core::Tagged for Error {"));
    }

    fn squash(source: &str) -> String {
        source.split_whitespace().collect()
    }

    #[test]
    fn test_render_marker_trait() {
        let source = render(vec![Item::MarkerTrait(MarkerTrait {
            trait_name: "IsAccount".to_string(),
            base: "Account".to_string(),
            method_suffix: "account".to_string(),
            discriminator: "tag".to_string(),
            members: vec![(named("BasicAccount"), "ACCOUNT_BASIC".to_string())],
            unknown_tags: UnknownTagPolicy::Preserve,
        })]);

        assert!(source.contains("pub trait IsAccount: ::std::fmt::Debug {"));
        assert!(source.contains("impl IsAccount for Account {"));
        assert!(source.contains("impl IsAccount for BasicAccount {"));
        assert!(source.contains("UnionEncoder::new(\"tag\", ACCOUNT_BASIC)"));
        assert!(source.contains("impl ::serde::Serialize for dyn IsAccount {"));
        assert!(source.contains("for Box<dyn IsAccount> {"));
        assert!(!source.contains("unknown_variant"));

        let compact = squash(&source);
        assert!(compact.contains("Some(ACCOUNT_BASIC)=>Box::new("));
        assert!(compact.contains("impl::std::cmp::PartialEqforBox<dynIsAccount>{"));
        assert!(compact.contains("impl::std::cmp::PartialEq<&Box<dynIsAccount>>forBox<dynIsAccount>{"));
        assert!(!compact.contains("PartialEqfordynIsAccount"));
    }

    #[test]
    fn test_file_header() {
        let renderer = Renderer::new(
            &GeneratorConfig::new().with_header("Source: api.json"),
        )
        .expect("renderer");
        let source = renderer
            .render_unit(&SourceUnit {
                namespace: "errors".to_string(),
                doc: Some("Error types.".to_string()),
                items: Vec::new(),
            })
            .expect("render");
        assert_eq!(
            source,
            "// Code generated by schemaforge. DO NOT EDIT.\n\
             // Namespace: errors\n\
             // Source: api.json\n\
             //\n\
             // Error types.\n\n"
        );
    }
}
