//! `noderank init` — Write a default configuration file.

use clap::Args;
use std::path::Path;

use noderank_core::NodeRankConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, path: &Path) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!("configuration file already exists at {}", path.display());
    }

    NodeRankConfig::default().save(path)?;
    println!("Wrote default configuration to {}", path.display());
    println!("Set [ledger] url and address, then run 'noderank rank <period>'.");
    Ok(())
}
