use noderank_core::CoreError;
use noderank_graph::GraphError;

/// Ledger transport errors.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ledger returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("ledger rejected command: {0}")]
    Rejected(String),

    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),

    #[error("command encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors surfaced by the public pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("transport error: {0}")]
    Transport(#[from] LedgerError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
