mod cli;
mod commands;
mod report;

use anyhow::Result;
use clap::Parser;
use revu_core::{logging, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let _guard = logging::init_logging(&cli.log_level, cli.log_dir.as_deref());

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load(),
    };

    commands::execute(cli, config).await
}
