//! Thesaurus CLI: browse and search the environmental concept catalog.
//!
//! Looks up terms, runs keyword searches and walks the concept hierarchy,
//! printing results as text or JSON.

mod commands;
mod render;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
