/// Clarify Export - dump every bundle of an account as JSON files
use clap::Parser;
use clarify_client::ClarifyClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod export;

use config::ExportConfig;
use error::ExportError;
use export::Exporter;

#[derive(Parser)]
#[command(name = "clarify-export")]
#[command(about = "Export all data of a Clarify account as JSON files", long_about = None)]
struct Cli {
    /// Directory the JSON files are written to (created if missing)
    output_dir: PathBuf,

    /// API key (overrides the configuration file)
    #[arg(long, env = "CLARIFY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// API host (overrides the configuration file)
    #[arg(long)]
    host: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clarify_export=info,clarify_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(failure) = err.api_failure() {
            eprintln!("{}: {}", failure.status(), failure.status_code());
        }
        return Err(err.into());
    }

    Ok(())
}

fn run(cli: Cli) -> error::Result<()> {
    let mut config = ExportConfig::load(cli.config.as_deref())?;
    if let Some(api_key) = cli.api_key {
        config.api.key = api_key;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    config.validate()?;

    tracing::info!("Starting Clarify export");
    tracing::info!("Host: {}", config.api.host);
    tracing::info!("Output: {}", cli.output_dir.display());

    let client = ClarifyClient::new(config.client_config())?;
    let summary = Exporter::new(&client, cli.output_dir).run()?;

    println!(
        "Exported {} bundles ({} files)",
        summary.bundles, summary.files
    );
    Ok(())
}
