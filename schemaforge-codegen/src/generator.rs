//! Main code generator.

use std::path::{Path, PathBuf};

use schemaforge_schema::{Api, DataType, Namespace, validate_api};
use tracing::{debug, info, warn};

use crate::collisions::check_unit;
use crate::config::GeneratorConfig;
use crate::context::NamespaceContext;
use crate::error::CodegenError;
use crate::ir::{Item, SourceUnit};
use crate::naming::module_ident;
use crate::output::OutputDir;
use crate::rust::{Renderer, StructEmitter, UnionEmitter};

/// Name of the generated module index.
pub const INDEX_FILE: &str = "mod.rs";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Namespace the file was generated from.
    pub namespace: String,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Formatted Rust source.
    pub contents: String,
}

/// Code generator for schemaforge schemas.
pub struct Generator<'a> {
    api: &'a Api,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator with default settings.
    ///
    /// # Arguments
    /// * `api` - Schema to generate code for
    #[must_use]
    pub fn new(api: &'a Api) -> Self {
        Self::with_config(api, GeneratorConfig::default())
    }

    /// Creates a new generator with the given settings.
    #[must_use]
    pub fn with_config(api: &'a Api, config: GeneratorConfig) -> Self {
        Self { api, config }
    }

    /// Returns the generator settings.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Lowers one namespace into its intermediate representation.
    ///
    /// Data types are emitted in declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if any type of the namespace cannot be
    /// generated, or if two schema names map onto the same Rust identifier.
    pub fn build_unit(&self, namespace: &Namespace) -> Result<SourceUnit, CodegenError> {
        let ctx = NamespaceContext::new(self.api, namespace, &self.config);
        let mut items = Vec::new();
        for data_type in &namespace.data_types {
            items.extend(self.emit_data_type(ctx, data_type)?);
        }
        let unit = SourceUnit {
            namespace: namespace.name.clone(),
            doc: namespace.doc.clone(),
            items,
        };
        check_unit(&unit)?;
        Ok(unit)
    }

    fn emit_data_type(
        &self,
        ctx: NamespaceContext<'_>,
        data_type: &DataType,
    ) -> Result<Vec<Item>, CodegenError> {
        match data_type {
            DataType::Record(record) => {
                let mut items = StructEmitter::new(ctx).emit(record)?;
                if let Some(family) = &record.family {
                    items.extend(UnionEmitter::new(ctx).emit_family(record, family)?);
                }
                Ok(items)
            }
            DataType::Union(union) => UnionEmitter::new(ctx).emit_union(union),
        }
    }

    /// Generates the source file of one namespace.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation fails; nothing is produced for
    /// the namespace in that case.
    pub fn generate_namespace(&self, namespace: &Namespace) -> Result<GeneratedFile, CodegenError> {
        info!("Generating namespace {}", namespace.name);
        let renderer = Renderer::new(&self.config)?;
        let unit = self.build_unit(namespace)?;
        let contents = renderer.render_unit(&unit)?;
        debug!(
            "Namespace {} produced {} items, {} bytes",
            namespace.name,
            unit.items.len(),
            contents.len()
        );
        Ok(GeneratedFile {
            namespace: namespace.name.clone(),
            file_name: format!("{}.rs", module_ident(&namespace.name).trim_start_matches("r#")),
            contents,
        })
    }

    /// Validates the schema and generates one file per namespace, in
    /// declaration order.
    ///
    /// # Errors
    /// Returns `CodegenError` if the schema is invalid or any namespace fails
    /// to generate.
    pub fn generate_all(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        self.check_config()?;
        validate_api(self.api)?;
        self.generate_namespaces()
    }

    #[cfg(not(feature = "parallel"))]
    fn generate_namespaces(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        self.api
            .namespaces
            .iter()
            .map(|ns| self.generate_namespace(ns))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn generate_namespaces(&self) -> Result<Vec<GeneratedFile>, CodegenError> {
        use rayon::prelude::*;

        self.api
            .namespaces
            .par_iter()
            .map(|ns| self.generate_namespace(ns))
            .collect()
    }

    /// Generates a module index declaring every namespace module.
    #[must_use]
    pub fn generate_index(&self) -> String {
        let mut index = String::from("// Code generated by schemaforge. DO NOT EDIT.\n\n");
        for namespace in &self.api.namespaces {
            if let Some(doc) = &namespace.doc {
                for line in doc.lines() {
                    index.push_str(&format!("/// {line}\n"));
                }
            }
            index.push_str(&format!("pub mod {};\n", module_ident(&namespace.name)));
        }
        index
    }

    /// Generates every namespace and writes the files, the module index and
    /// configured passthrough fragments to `dir`.
    ///
    /// Everything is generated before the first file is written, so a
    /// failing namespace leaves the directory untouched. Passthrough
    /// fragments whose source file does not exist are skipped.
    ///
    /// # Returns
    /// Paths of all written files.
    ///
    /// # Errors
    /// Returns `CodegenError` if generation or writing fails.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>, CodegenError> {
        let files = self.generate_all()?;
        let output = OutputDir::create(dir)?;

        let mut written = Vec::with_capacity(files.len() + 1);
        for file in &files {
            written.push(output.write(&file.file_name, &file.contents)?);
        }
        written.push(output.write(INDEX_FILE, &self.generate_index())?);
        for passthrough in &self.config.passthrough {
            if !passthrough.source.exists() {
                warn!(
                    "Passthrough fragment {} for namespace {} not found, skipping",
                    passthrough.source.display(),
                    passthrough.namespace
                );
                continue;
            }
            written.push(output.copy_passthrough(passthrough)?);
        }

        info!("Wrote {} files to {}", written.len(), dir.display());
        Ok(written)
    }

    fn check_config(&self) -> Result<(), CodegenError> {
        if self.config.discriminator.is_empty() {
            return Err(CodegenError::generation("discriminator key must not be empty"));
        }
        for passthrough in &self.config.passthrough {
            if self.api.get_namespace(&passthrough.namespace).is_none() {
                return Err(CodegenError::generation(format!(
                    "passthrough fragment {} names unknown namespace '{}'",
                    passthrough.source.display(),
                    passthrough.namespace
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_api;
    use schemaforge_schema::{Field, PrimitiveType, Record, TypeName, TypeRef, Union, Variant};

    #[test]
    fn test_build_unit_declaration_order() {
        let api = sample_api();
        let generator = Generator::new(&api);
        let ns = api.get_namespace("accounts").expect("namespace");
        let unit = generator.build_unit(ns).expect("unit");

        let structs: Vec<&str> = unit
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Struct(decl) => Some(decl.name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            structs,
            vec![
                "AccountType",
                "Account",
                "AccountUnion",
                "BasicAccount",
                "FullAccount",
                "TrialAccount",
                "Session"
            ]
        );
        assert!(unit.get_constructor("Session").is_some());
        assert!(unit.get_codec("AccountUnion").is_some());
        assert!(unit.get_codec("AccountType").is_none());
    }

    #[test]
    fn test_generate_all() {
        let api = sample_api();
        let config = GeneratorConfig::new().with_discriminator("tag");
        let files = Generator::with_config(&api, config)
            .generate_all()
            .expect("generate");

        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["common.rs", "errors.rs", "accounts.rs"]);

        let errors = &files[1].contents;
        assert!(errors.contains("pub struct Error {"));
        assert!(errors.contains("pub rate_limit: Option<Box<RateLimitError>>,"));
        assert!(errors.contains("pub retry: Option<Box<super::common::RetryPolicy>>,"));
        assert!(errors.contains("pub const ERROR_RATE_LIMIT: &str = \"rate_limit\";"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let api = sample_api();
        let first = Generator::new(&api).generate_all().expect("generate");
        let second = Generator::new(&api).generate_all().expect("generate");
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_all_validates_schema() {
        let api = Api::new().namespace(Namespace::new("ns").record(
            Record::new("A").field(Field::new("b", TypeRef::named("ns", "Missing"))),
        ));
        let result = Generator::new(&api).generate_all();
        assert!(matches!(result, Err(CodegenError::Schema(_))));
    }

    #[test]
    fn test_generate_namespace_unknown_type() {
        let api = Api::new().namespace(Namespace::new("ns").record(
            Record::new("A").field(Field::new("b", TypeRef::named("ns", "Missing"))),
        ));
        let ns = api.get_namespace("ns").expect("namespace");
        let result = Generator::new(&api).generate_namespace(ns);
        assert!(matches!(result, Err(CodegenError::UnknownType { .. })));
    }

    #[test]
    fn test_empty_discriminator_rejected() {
        let api = sample_api();
        let config = GeneratorConfig::new().with_discriminator("");
        let result = Generator::with_config(&api, config).generate_all();
        assert!(matches!(result, Err(CodegenError::Generation { .. })));
    }

    #[test]
    fn test_passthrough_unknown_namespace_rejected() {
        let api = sample_api();
        let config = GeneratorConfig::new().with_passthrough("nowhere", "extra.rs");
        let result = Generator::with_config(&api, config).generate_all();
        assert!(matches!(result, Err(CodegenError::Generation { .. })));
    }

    fn string() -> TypeRef {
        TypeRef::Primitive(PrimitiveType::String)
    }

    fn generation_error(api: &Api, config: GeneratorConfig) -> String {
        match Generator::with_config(api, config).generate_all() {
            Err(CodegenError::Generation { message }) => message,
            other => panic!("expected generation error, got {other:?}"),
        }
    }

    #[test]
    fn test_field_named_after_parent_rejected() {
        let api = Api::new().namespace(
            Namespace::new("ns")
                .record(Record::new("Entity").field(Field::new("id", string())))
                .record(
                    Record::new("Team")
                        .parent(TypeName::new("ns", "Entity"))
                        .field(Field::new("entity", string())),
                ),
        );
        let message = generation_error(&api, GeneratorConfig::new());
        assert!(message.contains("field 'entity'"));
        assert!(message.contains("struct 'Team'"));
    }

    #[test]
    fn test_fields_with_same_identifier_rejected() {
        let api = Api::new().namespace(
            Namespace::new("ns").record(
                Record::new("Account")
                    .field(Field::new("accountId", string()))
                    .field(Field::new("account_id", string())),
            ),
        );
        let message = generation_error(&api, GeneratorConfig::new());
        assert!(message.contains("'account_id'"));
        assert!(message.contains("'Account'"));
    }

    #[test]
    fn test_tag_constants_with_same_identifier_rejected() {
        let api = Api::new().namespace(
            Namespace::new("ns")
                .union(
                    Union::new("Error")
                        .variant(Variant::void("rate_limit"))
                        .variant(Variant::void("other")),
                )
                .union(Union::new("ErrorRate").variant(Variant::void("limit"))),
        );
        let message = generation_error(&api, GeneratorConfig::new());
        assert!(message.contains("constant 'ERROR_RATE_LIMIT'"));
    }

    #[test]
    fn test_variant_named_tag_rejected() {
        let api = Api::new().namespace(
            Namespace::new("ns").union(
                Union::new("Wrap")
                    .variant(Variant::void("none"))
                    .variant(Variant::new("tag", string())),
            ),
        );
        let message = generation_error(&api, GeneratorConfig::new().with_discriminator("kind"));
        assert!(message.contains("'tag'"));
        assert!(message.contains("'Wrap'"));
    }

    #[test]
    fn test_payload_key_equal_to_discriminator_rejected() {
        let api = Api::new().namespace(
            Namespace::new("ns").union(
                Union::new("Wrap")
                    .variant(Variant::void("none"))
                    .variant(Variant::new("kind", string())),
            ),
        );
        let message = generation_error(&api, GeneratorConfig::new().with_discriminator("kind"));
        assert!(message.contains("collides with the discriminator"));

        let files = Generator::with_config(&api, GeneratorConfig::new().with_discriminator("type"))
            .generate_all()
            .expect("generate");
        assert!(files[0].contents.contains("pub kind: Option<String>,"));
    }

    #[test]
    fn test_generate_index() {
        let api = sample_api();
        let index = Generator::new(&api).generate_index();
        assert!(index.contains("/// Shared types.\npub mod common;\n"));
        assert!(index.contains("pub mod errors;\n"));
        assert!(index.contains("pub mod accounts;\n"));
    }

    #[test]
    fn test_write_to() {
        let api = sample_api();
        let dir = tempfile::tempdir().expect("tempdir");
        let written = Generator::new(&api).write_to(dir.path()).expect("write");

        assert_eq!(written.len(), 4);
        assert!(dir.path().join("errors.rs").exists());
        assert!(dir.path().join(INDEX_FILE).exists());
        let errors = std::fs::read_to_string(dir.path().join("errors.rs")).expect("read");
        assert!(errors.starts_with("// Code generated by schemaforge."));
    }

    #[test]
    fn test_write_to_with_passthrough() {
        let api = sample_api();
        let dir = tempfile::tempdir().expect("tempdir");
        let fragment = dir.path().join("metadata.rs");
        std::fs::write(&fragment, "pub const VERSION: u32 = 2;\n").expect("write fragment");

        let config = GeneratorConfig::new()
            .with_passthrough("errors", fragment.clone())
            .with_passthrough("accounts", dir.path().join("absent.rs"));
        let out = dir.path().join("out");
        let written = Generator::with_config(&api, config)
            .write_to(&out)
            .expect("write");

        assert_eq!(written.len(), 5);
        assert_eq!(
            std::fs::read_to_string(out.join("errors").join("metadata.rs")).expect("read"),
            "pub const VERSION: u32 = 2;\n"
        );
        assert!(!out.join("accounts").exists());
    }
}
