mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod store;
mod workflow;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::error::AppResult;

#[derive(Parser)]
#[command(
    name = "ticketbot",
    author,
    version,
    about = "Discord helpdesk bot that files GitHub issues"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve the ticket workflow.
    Run,
    /// Inspect the configuration read from the environment.
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ticketbot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Run => cmd::run::run(AppConfig::load()?).await,
    }
}
