/// Failure to turn one raw ledger record into an [`Envelope`](crate::Envelope).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed percent escape at byte {position}")]
    MalformedEscape { position: usize },

    #[error("percent-decoded payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("envelope json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid score {score} on edge {index} (must be a non-negative integer)")]
    InvalidScore { index: usize, score: f64 },

    #[error("envelope declares {declared} edges but carries {actual}")]
    CountMismatch { declared: i64, actual: usize },
}

/// Core protocol errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid attestation weight {raw:?}: {reason}")]
    InvalidWeight { raw: String, reason: String },

    #[error("decode error in record {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Wrap a decode failure with the position of the offending record.
    pub fn decode(index: usize, source: DecodeError) -> Self {
        Self::Decode { index, source }
    }
}
