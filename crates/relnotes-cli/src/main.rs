//! relnotes CLI - Link dependency bumps to their release notes
//!
//! This is the main entry point for the relnotes command-line interface.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod utils;

use cli::{Cli, Commands};
use utils::logging::initialize_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::LinkDependencies(args) => commands::link_dependencies(&args).await,
        Commands::Render(args) => commands::render(&args),
    }
}
