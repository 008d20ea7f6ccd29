use schemaforge::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "schemaforge=info,schemaforge_codegen=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::load().run()
}
