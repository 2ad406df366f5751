use noderank_core::{CoreError, Identity};

/// Graph-layer errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("invalid weight {weight} on edge {attester} -> {attestee} (must be finite and non-negative)")]
    InvalidWeight {
        attester: Identity,
        attestee: Identity,
        weight: f64,
    },

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}
