use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod ingest;
mod resolve;

#[derive(Debug, Parser)]
#[command(name = "salemap")]
#[command(about = "Pincode sales map toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a sales CSV to coordinates and derive the display set.
    Resolve(resolve::ResolveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salemap_core::load_app_config_from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve(args) => resolve::run_resolve(&config, &args).await,
    }
}
