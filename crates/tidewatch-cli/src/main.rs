//! Tidewatch - gazette monitoring for tracked entities.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tidewatch_cli::commands;
use tidewatch_cli::{AppConfig, Cli, Command};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_settings(cli.settings)?;

    match cli.command {
        Command::Run => commands::execute_run(&config).await,
        Command::Watch => commands::execute_watch(&config).await,
        Command::Analyze(args) => commands::execute_analyze(&config, &args.file).await,
    }
}
