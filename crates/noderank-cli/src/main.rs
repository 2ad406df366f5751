//! NodeRank CLI — Reputation ranking over ledger attestations.
//!
//! Subcommands: init, attest, rank, graph.

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use noderank_core::NodeRankConfig;

/// NodeRank — PageRank reputation over attestation graphs.
#[derive(Parser, Debug)]
#[command(name = "noderank", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "noderank.toml")]
    config: PathBuf,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration file.
    Init(commands::init::InitArgs),
    /// Publish a trust attestation to the ledger.
    Attest(commands::attest::AttestArgs),
    /// Rank the identities attested in a period.
    Rank(commands::rank::RankArgs),
    /// Export the attestation graph of a period.
    Graph(commands::graph::GraphArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Init(args) = &cli.command {
        return commands::init::run(args, &cli.config);
    }

    let mut config = NodeRankConfig::load(&cli.config)?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    logging::init(&config.logging);

    match &cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Attest(args) => commands::attest::run(args, config).await,
        Commands::Rank(args) => commands::rank::run(args, config).await,
        Commands::Graph(args) => commands::graph::run(args, config).await,
    }
}
