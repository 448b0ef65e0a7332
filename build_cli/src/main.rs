//! mhw-build - Build stats, matchup recommendations and catalog listings
//!
//! Loads a catalog snapshot (TOML or JSON) and prints results as JSON on
//! stdout. Logs go to stderr, filtered by `RUST_LOG` (default `info`).

mod commands;

use anyhow::{Context, Result};
use build_core::Catalog;
use clap::{Parser, Subcommand};
use commands::{ListCommand, RecommendArgs, StatsArgs};
use std::path::PathBuf;

/// Monster Hunter World build tools
#[derive(Parser, Debug)]
#[command(name = "mhw-build")]
#[command(about = "Build stats and matchup recommendations for MHW loadouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Catalog snapshot file (.toml or .json)
    #[arg(long, env = "MHW_CATALOG")]
    catalog: PathBuf,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the stats report of a saved build
    Stats(StatsArgs),

    /// Recommend a loadout against a monster
    Recommend(RecommendArgs),

    /// List catalog entries
    #[command(subcommand)]
    List(ListCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;

    let output = match cli.command {
        Command::Stats(args) => args.execute(&catalog)?,
        Command::Recommend(args) => args.execute(&catalog)?,
        Command::List(cmd) => cmd.execute(&catalog)?,
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{text}");
    Ok(())
}
