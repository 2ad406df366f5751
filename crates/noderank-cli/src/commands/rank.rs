//! `noderank rank` — Rank the identities attested in a period.

use clap::Args;

use noderank_core::NodeRankConfig;

use super::LedgerArgs;

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Ledger period to rank.
    pub period: u64,

    /// Number of identities to show (defaults to `[rank] top_n`).
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub top: Option<i64>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub ledger: LedgerArgs,
}

pub async fn run(args: &RankArgs, config: NodeRankConfig) -> anyhow::Result<()> {
    let top_n = args
        .top
        .unwrap_or_else(|| i64::try_from(config.rank.top_n).unwrap_or(i64::MAX));
    let noderank = args.ledger.connect(config)?;
    let result = noderank.compute_ranking(args.period, top_n).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Period {}: {} identities, {} edges",
        args.period, result.node_count, result.edge_count
    );
    if !result.converged {
        println!(
            "  (stopped after {} iterations without converging)",
            result.iterations
        );
    }
    if result.skipped_records > 0 {
        println!("  ({} undecodable records skipped)", result.skipped_records);
    }
    if result.is_empty() {
        println!("  No attestations.");
        return Ok(());
    }
    for (pos, entry) in result.entries.iter().enumerate() {
        println!("  {:>3}. {:.6}  {}", pos + 1, entry.score, entry.identity);
    }
    Ok(())
}
