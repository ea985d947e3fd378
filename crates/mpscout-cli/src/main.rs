mod export;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::search::{ParseArgs, SearchArgs};

#[derive(Debug, Parser)]
#[command(name = "mpscout")]
#[command(about = "Search a classifieds marketplace and filter the listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load a live search results page in a browser and filter its listings
    Search(SearchArgs),
    /// Filter listings from a saved results page without starting a browser
    Parse(ParseArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mpscout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => search::run_search(&config, &args).await,
        Commands::Parse(args) => search::run_parse(&config, &args),
    }
}
