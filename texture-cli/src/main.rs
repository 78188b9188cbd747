//! Texture command-line tool

use clap::Parser;
use texture_cli::commands::Commands;

/// Chunk, extract from and inspect labeled text corpora
#[derive(Debug, Parser)]
#[command(name = "texture", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
