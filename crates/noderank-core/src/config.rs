//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::envelope::DecodePolicy;
use crate::error::CoreError;

/// Ledger endpoint used when none is configured.
pub const DEFAULT_LEDGER_URL: &str = "http://localhost:14700";

/// Ledger address used when none is configured.
pub const DEFAULT_LEDGER_ADDRESS: &str =
    "JVSVAFSXWHUIZPFDLORNDMASGNXWFGZFMXGLCJQGFWFEZWWOA9KYSPHCLZHFBCOHMNCCBAGNACPIGHVYX";

/// Full NodeRank configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NodeRankConfig {
    /// Ledger transport settings.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Ranking parameters.
    #[serde(default)]
    pub rank: RankConfig,

    /// Record decoding policy.
    #[serde(default)]
    pub decode: DecodeConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Ledger node endpoint.
    #[serde(default = "default_url")]
    pub url: String,
    /// Address attestations are stored under.
    #[serde(default = "default_address")]
    pub address: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Value of the `X-IOTA-API-Version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Number of identities returned by a ranking query.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    #[serde(default)]
    pub policy: DecodePolicy,
    /// Treat `tee_num` disagreeing with the edge count as a decode error.
    #[serde(default)]
    pub strict_count: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

// Default value functions
fn default_url() -> String {
    DEFAULT_LEDGER_URL.into()
}
fn default_address() -> String {
    DEFAULT_LEDGER_ADDRESS.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_api_version() -> String {
    "1".into()
}
fn default_damping() -> f64 {
    0.85
}
fn default_epsilon() -> f64 {
    0.0001
}
fn default_max_iterations() -> usize {
    100
}
fn default_top_n() -> usize {
    10
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            address: default_address(),
            timeout_secs: default_timeout_secs(),
            api_version: default_api_version(),
        }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            epsilon: default_epsilon(),
            max_iterations: default_max_iterations(),
            top_n: default_top_n(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl RankConfig {
    pub fn params(&self) -> RankParams {
        RankParams {
            damping: self.damping,
            epsilon: self.epsilon,
            max_iterations: self.max_iterations,
        }
    }
}

/// Parameters of the iterative ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankParams {
    /// Share of rank that follows edges; the rest is spread uniformly.
    pub damping: f64,
    /// Convergence threshold on the largest per-node change.
    pub epsilon: f64,
    /// Iteration cap; reaching it is not an error.
    pub max_iterations: usize,
}

impl Default for RankParams {
    fn default() -> Self {
        RankConfig::default().params()
    }
}

impl RankParams {
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(0.0..1.0).contains(&self.damping) {
            return Err(CoreError::Validation(format!(
                "damping must be in [0, 1), got {}",
                self.damping
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(CoreError::Validation(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if self.max_iterations == 0 {
            return Err(CoreError::Validation(
                "max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl NodeRankConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| CoreError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::Config(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(path, contents)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))
    }
}

/// Key/value view of configuration used to locate the ledger.
///
/// Recognized keys are `"addr"` and `"url"`.
pub trait ConfigProvider {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigProvider for NodeRankConfig {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            "addr" => Some(self.ledger.address.clone()),
            "url" => Some(self.ledger.url.clone()),
            _ => None,
        }
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Where attestations are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTarget {
    pub url: String,
    pub address: String,
}

impl LedgerTarget {
    /// Resolve from a provider; missing or empty values use the defaults.
    pub fn resolve(provider: &impl ConfigProvider) -> Self {
        let lookup = |key: &str, fallback: &str| {
            provider
                .get(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };
        Self {
            url: lookup("url", DEFAULT_LEDGER_URL),
            address: lookup("addr", DEFAULT_LEDGER_ADDRESS),
        }
    }
}

impl Default for LedgerTarget {
    fn default() -> Self {
        Self {
            url: DEFAULT_LEDGER_URL.into(),
            address: DEFAULT_LEDGER_ADDRESS.into(),
        }
    }
}
