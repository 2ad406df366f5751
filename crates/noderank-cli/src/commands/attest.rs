//! `noderank attest` — Publish a trust attestation.

use clap::Args;

use noderank_core::NodeRankConfig;

use super::LedgerArgs;

#[derive(Args, Debug)]
pub struct AttestArgs {
    /// Identity making the attestation.
    pub attester: String,

    /// Identity being attested.
    pub attestee: String,

    /// Attestation weight (non-negative integer).
    pub weight: String,

    /// Store under this address instead of the configured one.
    #[arg(short, long)]
    pub address: Option<String>,

    #[command(flatten)]
    pub ledger: LedgerArgs,
}

pub async fn run(args: &AttestArgs, mut config: NodeRankConfig) -> anyhow::Result<()> {
    if let Some(address) = &args.address {
        config.ledger.address = address.clone();
    }
    let noderank = args.ledger.connect(config)?;

    let reply = noderank
        .submit_attestation(&args.attester, &args.attestee, &args.weight)
        .await?;

    println!("Attestation submitted!");
    println!("  Attester: {}", args.attester);
    println!("  Attestee: {}", args.attestee);
    println!("  Weight:   {}", args.weight);
    println!("  Address:  {}", noderank.address());
    if !reply.trim().is_empty() {
        println!("  Ledger:   {}", reply.trim());
    }
    Ok(())
}
