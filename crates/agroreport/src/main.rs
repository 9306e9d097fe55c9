// crates/agroreport/src/main.rs

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::generate::{handle_generate, GenerateArgs};
use commands::preview::{handle_preview, PreviewArgs};

/// Turns drone flight logs into printable work orders.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML file with report settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build one PDF work order per (date, location) and bundle them into a ZIP archive
    Generate(GenerateArgs),
    /// Show the first rows of a flight log and the work orders it would produce
    Preview(PreviewArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => handle_generate(args, config),
        Command::Preview(args) => handle_preview(args),
    }
}
