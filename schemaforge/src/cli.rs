//! Command line interface: generate | check.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use schemaforge_codegen::config::{DEFAULT_DISCRIMINATOR, DEFAULT_RUNTIME_CRATE};
use schemaforge_codegen::{Generator, GeneratorConfig};
use schemaforge_schema::{Api, validate_api};
use tracing::info;

/// Generate Rust types and tagged-union JSON codecs from a schema.
#[derive(Parser, Debug)]
#[command(name = "schemaforge", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate one Rust file per namespace plus a module index
    Generate(GenerateArgs),
    /// load and validate a schema without writing anything
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// schema document (JSON)
    #[arg(short, long)]
    schema: PathBuf,

    /// output directory, created if missing
    #[arg(short, long)]
    out: PathBuf,

    /// JSON key holding the variant tag
    #[arg(long, default_value = DEFAULT_DISCRIMINATOR)]
    discriminator: String,

    /// path of the runtime crate as seen from generated code
    #[arg(long, default_value = DEFAULT_RUNTIME_CRATE)]
    runtime: String,

    /// fail decoding on unknown tags instead of preserving them
    #[arg(long, default_value_t = false)]
    reject_unknown_tags: bool,

    /// extra line for the header comment of every generated file
    #[arg(long)]
    header: Option<String>,

    /// hand-maintained fragment copied next to a namespace (NAMESPACE=PATH)
    #[arg(long, value_parser = parse_passthrough)]
    passthrough: Vec<(String, PathBuf)>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// schema document (JSON)
    #[arg(short, long)]
    schema: PathBuf,
}

impl Cli {
    /// Parses the process arguments.
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }

    /// Runs the selected subcommand.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be loaded or validated, or if
    /// generation fails.
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Command::Generate(args) => args.run(),
            Command::Check(args) => args.run(),
        }
    }
}

impl GenerateArgs {
    fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new()
            .with_discriminator(&self.discriminator)
            .with_runtime_crate(&self.runtime);
        if self.reject_unknown_tags {
            config = config.reject_unknown_tags();
        }
        if let Some(header) = &self.header {
            config = config.with_header(header);
        }
        for (namespace, source) in &self.passthrough {
            config = config.with_passthrough(namespace, source.clone());
        }
        config
    }

    fn run(&self) -> Result<()> {
        let api = load_schema(&self.schema)?;
        let written = Generator::with_config(&api, self.config())
            .write_to(&self.out)
            .with_context(|| format!("generating into {}", self.out.display()))?;
        for path in &written {
            info!("Wrote {}", path.display());
        }
        Ok(())
    }
}

impl CheckArgs {
    fn run(&self) -> Result<()> {
        let api = load_schema(&self.schema)?;
        validate_api(&api).with_context(|| format!("validating {}", self.schema.display()))?;
        let types: usize = api.namespaces.iter().map(|ns| ns.data_types.len()).sum();
        info!(
            "Schema {} is valid: {} namespaces, {} data types",
            self.schema.display(),
            api.namespaces.len(),
            types
        );
        Ok(())
    }
}

fn load_schema(path: &Path) -> Result<Api> {
    Api::from_file(path).with_context(|| format!("loading schema {}", path.display()))
}

fn parse_passthrough(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((namespace, path)) if !namespace.is_empty() && !path.is_empty() => {
            Ok((namespace.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAMESPACE=PATH, got '{value}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaforge_codegen::UnknownTagPolicy;

    const SCHEMA: &str = r#"{
        "namespaces": [{
            "name": "errors",
            "types": [
                {"kind": "record", "name": "RateLimitError",
                 "fields": [{"name": "limit", "type": {"primitive": "int64"}}]},
                {"kind": "union", "name": "Error",
                 "variants": [
                    {"name": "invalid_arg"},
                    {"name": "rate_limit",
                     "type": {"named": {"namespace": "errors", "name": "RateLimitError"}}}
                 ]}
            ]
        }]
    }"#;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("parse arguments")
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = parse(&["schemaforge", "generate", "--schema", "api.json", "--out", "gen"]);
        let Command::Generate(args) = &cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.schema, PathBuf::from("api.json"));
        assert_eq!(args.out, PathBuf::from("gen"));

        let config = args.config();
        assert_eq!(config.discriminator, DEFAULT_DISCRIMINATOR);
        assert_eq!(config.runtime_crate, DEFAULT_RUNTIME_CRATE);
        assert_eq!(config.unknown_tags, UnknownTagPolicy::Preserve);
        assert!(config.passthrough.is_empty());
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = parse(&[
            "schemaforge",
            "generate",
            "-s",
            "api.json",
            "-o",
            "gen",
            "--discriminator",
            "tag",
            "--runtime",
            "crate::rt",
            "--reject-unknown-tags",
            "--passthrough",
            "accounts=extra/meta.rs",
            "--passthrough",
            "errors=extra/codes.rs",
        ]);
        let Command::Generate(args) = &cli.command else {
            panic!("expected generate");
        };
        let config = args.config();
        assert_eq!(config.discriminator, "tag");
        assert_eq!(config.runtime_crate, "crate::rt");
        assert_eq!(config.unknown_tags, UnknownTagPolicy::Reject);
        assert_eq!(config.passthrough.len(), 2);
        assert_eq!(config.passthrough[0].namespace, "accounts");
        assert_eq!(config.passthrough[1].source, PathBuf::from("extra/codes.rs"));
    }

    #[test]
    fn test_parse_passthrough_rejects_malformed() {
        assert!(parse_passthrough("accounts").is_err());
        assert!(parse_passthrough("=meta.rs").is_err());
        assert!(parse_passthrough("accounts=").is_err());
        assert_eq!(
            parse_passthrough("a=b=c.rs").expect("parse"),
            ("a".to_string(), PathBuf::from("b=c.rs"))
        );
    }

    #[test]
    fn test_generate_requires_out() {
        let result = Cli::try_parse_from(["schemaforge", "generate", "--schema", "api.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_generate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let schema = dir.path().join("api.json");
        std::fs::write(&schema, SCHEMA).expect("write schema");
        let out = dir.path().join("gen");

        let cli = parse(&[
            "schemaforge",
            "generate",
            "--schema",
            schema.to_str().expect("utf-8 path"),
            "--out",
            out.to_str().expect("utf-8 path"),
            "--discriminator",
            "tag",
        ]);
        cli.run().expect("run");

        let errors = std::fs::read_to_string(out.join("errors.rs")).expect("read");
        assert!(errors.contains("pub struct Error {"));
        assert!(out.join("mod.rs").exists());
    }

    #[test]
    fn test_run_check_reports_invalid_schema() {
        let dir = tempfile::tempdir().expect("tempdir");
        let schema = dir.path().join("api.json");
        std::fs::write(
            &schema,
            r#"{"namespaces": [{"name": "ns", "types": [
                {"kind": "record", "name": "A",
                 "fields": [{"name": "b",
                             "type": {"named": {"namespace": "ns", "name": "Missing"}}}]}
            ]}]}"#,
        )
        .expect("write schema");

        let cli = parse(&["schemaforge", "check", "--schema", schema.to_str().expect("utf-8 path")]);
        assert!(cli.run().is_err());
    }

    #[test]
    fn test_run_check_missing_file() {
        let cli = parse(&["schemaforge", "check", "--schema", "/nonexistent/api.json"]);
        let error = cli.run().expect_err("missing schema");
        assert!(error.to_string().contains("loading schema"));
    }
}
