//! NodeRank Core — Fundamental types, errors, wire codec, and configuration
//! for reputation ranking over ledger-published attestations.

pub mod config;
pub mod envelope;
pub mod error;
pub mod types;

pub use config::{
    ConfigProvider, DecodeConfig, LedgerConfig, LedgerTarget, LogFormat, LoggingConfig,
    NodeRankConfig, RankConfig, RankParams,
};
pub use envelope::{
    decode_batch, decode_envelope, encode_envelope, percent_decode, percent_encode,
    DecodePolicy, DecodedBatch, Envelope,
};
pub use error::{CoreError, DecodeError};
pub use types::{AttestationEdge, Identity, RankedIdentity};
