use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// JSON command understood by the ledger node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum LedgerCommand {
    /// Store one percent-encoded envelope under `address`.
    StoreMessage {
        address: String,
        message: String,
        tag: String,
    },
    /// Fetch every record published in `period`.
    GetBlocksInPeriodStatement { period: u64 },
}

impl LedgerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StoreMessage { .. } => "storeMessage",
            Self::GetBlocksInPeriodStatement { .. } => "getBlocksInPeriodStatement",
        }
    }
}

/// Tag attached to stored attestations: `YYYYMMDD` followed by `TEE`.
pub fn store_tag(date: NaiveDate) -> String {
    format!("{}TEE", date.format("%Y%m%d"))
}

/// The `blocks` field arrives either as a JSON array of strings or as a
/// string holding that array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BlocksField {
    List(Vec<String>),
    Encoded(String),
}

/// Response to [`LedgerCommand::GetBlocksInPeriodStatement`].
#[derive(Debug, Clone, Deserialize)]
pub struct BlocksResponse {
    #[serde(default)]
    blocks: Option<BlocksField>,
    /// Time the ledger spent answering, as reported by the ledger.
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    error: Option<String>,
}

impl BlocksResponse {
    pub fn parse(body: &[u8]) -> Result<Self, LedgerError> {
        let response: Self = serde_json::from_slice(body)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;
        if let Some(error) = response.error.as_deref().filter(|e| !e.is_empty()) {
            return Err(LedgerError::Rejected(error.to_string()));
        }
        Ok(response)
    }

    /// The raw percent-encoded records, in ledger order.
    pub fn records(&self) -> Result<Vec<String>, LedgerError> {
        match &self.blocks {
            None => Ok(Vec::new()),
            Some(BlocksField::List(records)) => Ok(records.clone()),
            Some(BlocksField::Encoded(text)) if text.trim().is_empty() => Ok(Vec::new()),
            Some(BlocksField::Encoded(text)) => {
                let records: Option<Vec<String>> = serde_json::from_str(text)
                    .map_err(|e| LedgerError::InvalidResponse(format!("blocks: {e}")))?;
                Ok(records.unwrap_or_default())
            }
        }
    }
}
