//! Swarm CLI
//!
//! Command-line interface for browsing a repository's issues and sending them
//! through the scope-and-implement batch of the Swarm orchestrator.

mod commands;
mod config;
mod spinner;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "swarm")]
#[command(about = "Scope and implement GitHub issues with coding agents", long_about = None)]
struct Cli {
    /// Orchestrator URL
    #[arg(long, env = "SWARM_SERVER_URL", default_value = "http://127.0.0.1:8000")]
    server_url: String,

    /// Repository to work on
    #[arg(long, short, env = "SWARM_REPO", global = true)]
    repo: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        server_url: cli.server_url,
        repo: cli.repo,
    };

    handle_command(cli.command, &config).await
}
