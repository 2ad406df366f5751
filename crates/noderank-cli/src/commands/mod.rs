pub mod attest;
pub mod graph;
pub mod init;
pub mod rank;

use noderank_core::NodeRankConfig;
use noderank_ledger::{HttpLedgerClient, NodeRank};

/// Endpoint overrides shared by commands that reach the ledger.
#[derive(clap::Args, Debug, Clone)]
pub struct LedgerArgs {
    /// Ledger endpoint URL (overrides the config file).
    #[arg(short, long)]
    pub url: Option<String>,
}

impl LedgerArgs {
    pub fn connect(&self, mut config: NodeRankConfig) -> anyhow::Result<NodeRank<HttpLedgerClient>> {
        if let Some(url) = &self.url {
            config.ledger.url = url.clone();
        }
        let client = HttpLedgerClient::from_config(&config)?;
        tracing::debug!(url = client.url(), "using ledger");
        Ok(NodeRank::new(client, &config)?)
    }
}
