//! NodeRank Ledger Layer
//!
//! Talks to the ledger node that stores attestation records and runs the
//! full ranking pipeline on top of it:
//! - `LedgerCommand` / `BlocksResponse`: JSON command payloads
//! - `LedgerClient`: transport trait, with `HttpLedgerClient` over reqwest
//! - `NodeRank`: submit attestations, rank a period, export a period's graph

pub mod client;
pub mod command;
pub mod error;
pub mod pipeline;

pub use client::{HttpLedgerClient, LedgerClient};
pub use command::{store_tag, BlocksResponse, LedgerCommand};
pub use error::{LedgerError, PipelineError};
pub use pipeline::{export_records, rank_records, NodeRank, RankingResult};
