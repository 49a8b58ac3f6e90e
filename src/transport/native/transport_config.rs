use crate::prelude::*;
use std::time::Duration;

/// Request timeout, in seconds, used unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 1200;

/// Errors that can occur while loading a [`TransportConfig`] or building a
/// [`ReqwestTransport`] from it.
#[derive(Debug, thiserror::Error)]
pub enum TransportConfigError {
    /// The JSON is malformed or does not match the expected structure.
    #[error("failed to deserialize transport config: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to start transport runtime: {reason}")]
    Runtime { reason: String },
}

/// Configuration of a [`ReqwestTransport`], applied once when the transport is
/// constructed. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub timeout_secs: u64,
}

impl TransportConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TransportConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
