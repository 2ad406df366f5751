//! `noderank graph` — Export a period's attestation graph.

use clap::{Args, ValueEnum};

use noderank_core::NodeRankConfig;
use noderank_graph::StructuralGraph;

use super::LedgerArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GraphFormat {
    /// Graphviz digraph.
    Dot,
    /// `{"nodes": [...], "edges": [{"from", "to"}]}`.
    Json,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Ledger period to export.
    pub period: u64,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = GraphFormat::Dot)]
    pub format: GraphFormat,

    #[command(flatten)]
    pub ledger: LedgerArgs,
}

pub async fn run(args: &GraphArgs, config: NodeRankConfig) -> anyhow::Result<()> {
    let noderank = args.ledger.connect(config)?;
    let graph = noderank.export_graph(args.period).await?;

    match args.format {
        GraphFormat::Dot => print!("{}", to_dot(&graph)),
        GraphFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
    }
    Ok(())
}

/// Render as a Graphviz digraph named `G`. Identities are always quoted.
pub fn to_dot(graph: &StructuralGraph) -> String {
    let quote = |s: &str| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""));

    let mut out = String::from("digraph G {\n");
    for node in &graph.nodes {
        out.push_str(&format!("\t{};\n", quote(node.as_str())));
    }
    for edge in &graph.edges {
        out.push_str(&format!(
            "\t{}->{};\n",
            quote(edge.from.as_str()),
            quote(edge.to.as_str())
        ));
    }
    out.push_str("}\n");
    out
}
