//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Environment variable overriding the registry URL
pub const RPC_URL_ENV: &str = "KEYSPACE_RPC_URL";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "KEYSPACE_TIMEOUT_SECS";

/// Registry client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint of the registry
    pub rpc_url: String,

    /// Timeout for a single request (seconds)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8555".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Defaults, overridden by `KEYSPACE_RPC_URL` / `KEYSPACE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var(RPC_URL_ENV) {
            self.rpc_url = url;
        }
        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            self.timeout_secs = secs
                .parse()
                .map_err(|_| ClientError::Config(format!("{} is not a number: {}", TIMEOUT_ENV, secs)))?;
        }
        Ok(self)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}
