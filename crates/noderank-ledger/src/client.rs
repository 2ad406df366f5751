use async_trait::async_trait;
use std::time::Duration;

use noderank_core::{LedgerTarget, NodeRankConfig};

use crate::command::LedgerCommand;
use crate::error::LedgerError;

/// Transport to a ledger node.
///
/// Implementations post one command and hand back the raw response body.
/// Retry policy, if any, belongs to the implementation.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn post(&self, command: &LedgerCommand) -> Result<Vec<u8>, LedgerError>;
}

/// [`LedgerClient`] that POSTs JSON commands over HTTP.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    url: String,
    api_version: String,
}

impl HttpLedgerClient {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        api_version: impl Into<String>,
    ) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
            api_version: api_version.into(),
        })
    }

    /// Build a client for the configured endpoint.
    pub fn from_config(config: &NodeRankConfig) -> Result<Self, LedgerError> {
        let target = LedgerTarget::resolve(config);
        Self::new(
            target.url,
            Duration::from_secs(config.ledger.timeout_secs),
            config.ledger.api_version.clone(),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn post(&self, command: &LedgerCommand) -> Result<Vec<u8>, LedgerError> {
        let body = serde_json::to_vec(command)?;
        tracing::debug!(url = %self.url, command = command.name(), "posting ledger command");

        let resp = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("X-IOTA-API-Version", &self.api_version)
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(LedgerError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        Ok(bytes.to_vec())
    }
}
