//! The fetch → decode → build → rank → select pipeline.

use serde::Serialize;

use noderank_core::{
    decode_batch, encode_envelope, AttestationEdge, DecodeConfig, Envelope, LedgerTarget,
    NodeRankConfig, RankedIdentity,
};
use noderank_graph::{select_top, AttestationGraph, RankEngine, StructuralGraph};

use crate::client::LedgerClient;
use crate::command::{store_tag, BlocksResponse, LedgerCommand};
use crate::error::PipelineError;

/// Outcome of ranking one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult {
    /// Top identities, best first; ties in first-seen order.
    pub entries: Vec<RankedIdentity>,
    pub node_count: usize,
    pub edge_count: usize,
    pub iterations: usize,
    pub converged: bool,
    /// Records dropped by a skipping decode policy.
    pub skipped_records: usize,
}

impl RankingResult {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank already-fetched records.
///
/// A negative `top_n` selects nothing.
pub fn rank_records<S: AsRef<str>>(
    records: &[S],
    decode: &DecodeConfig,
    engine: &RankEngine,
    top_n: i64,
) -> Result<RankingResult, PipelineError> {
    let batch = decode_batch(records, decode)?;
    let graph = AttestationGraph::from_batch(&batch)?;
    let scores = engine.rank(&graph);
    let n = usize::try_from(top_n).unwrap_or(0);

    Ok(RankingResult {
        entries: select_top(&scores.entries, n),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        iterations: scores.iterations,
        converged: scores.converged,
        skipped_records: batch.skipped,
    })
}

/// Structural view of already-fetched records.
pub fn export_records<S: AsRef<str>>(
    records: &[S],
    decode: &DecodeConfig,
) -> Result<StructuralGraph, PipelineError> {
    let batch = decode_batch(records, decode)?;
    Ok(StructuralGraph::from_edges(batch.edges()))
}

/// Reputation service bound to one ledger.
///
/// Holds no state between calls beyond its configuration; every query
/// builds its graph from scratch.
pub struct NodeRank<C> {
    client: C,
    address: String,
    engine: RankEngine,
    decode: DecodeConfig,
}

impl<C: LedgerClient> NodeRank<C> {
    pub fn new(client: C, config: &NodeRankConfig) -> Result<Self, PipelineError> {
        let engine = RankEngine::new(config.rank.params())?;
        Ok(Self {
            client,
            address: LedgerTarget::resolve(config).address,
            engine,
            decode: config.decode.clone(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Publish one attestation and return the ledger's raw reply.
    ///
    /// `raw_weight` must be a non-negative base-10 integer.
    pub async fn submit_attestation(
        &self,
        attester: &str,
        attestee: &str,
        raw_weight: &str,
    ) -> Result<String, PipelineError> {
        let edge = AttestationEdge::from_raw(attester, attestee, raw_weight)?;
        let message = encode_envelope(&Envelope::single(edge))?;
        let command = LedgerCommand::StoreMessage {
            address: self.address.clone(),
            message,
            tag: store_tag(chrono::Utc::now().date_naive()),
        };

        let reply = self.client.post(&command).await?;
        tracing::info!(attester, attestee, weight = raw_weight, "attestation submitted");
        Ok(String::from_utf8_lossy(&reply).into_owned())
    }

    /// Raw records published in `period`.
    pub async fn fetch_period(&self, period: u64) -> Result<Vec<String>, PipelineError> {
        let reply = self
            .client
            .post(&LedgerCommand::GetBlocksInPeriodStatement { period })
            .await?;
        let response = BlocksResponse::parse(&reply)?;
        let records = response.records()?;
        tracing::info!(
            period,
            blocks = records.len(),
            duration = response.duration,
            "fetched period blocks"
        );
        Ok(records)
    }

    /// Rank every identity attested in `period` and return the top `top_n`.
    pub async fn compute_ranking(
        &self,
        period: u64,
        top_n: i64,
    ) -> Result<RankingResult, PipelineError> {
        let records = self.fetch_period(period).await?;
        let result = rank_records(&records, &self.decode, &self.engine, top_n)?;
        tracing::info!(
            period,
            nodes = result.node_count,
            edges = result.edge_count,
            iterations = result.iterations,
            converged = result.converged,
            "ranking computed"
        );
        Ok(result)
    }

    /// Weight-free graph of every attestation in `period`.
    pub async fn export_graph(&self, period: u64) -> Result<StructuralGraph, PipelineError> {
        let records = self.fetch_period(period).await?;
        export_records(&records, &self.decode)
    }
}
