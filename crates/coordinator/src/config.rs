//! Configuration for the coordinator.

use std::net::SocketAddr;
use std::path::Path;

use cepnet_common::{CepnetError, Result, load_toml};
use cepnet_llm::LlmConfig;
use serde::{Deserialize, Serialize};

/// Main coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URLs probed for `GET /card` at startup, in routing order
    #[serde(default = "default_specialists")]
    pub specialists: Vec<String>,

    #[serde(default = "default_discovery_timeout")]
    pub discovery_timeout_ms: u64,

    /// Deadline for one specialist invocation
    #[serde(default = "default_forward_timeout")]
    pub forward_timeout_ms: u64,

    /// How many prior chat turns the fallback reply sees
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Model used for routing and fallback replies
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8004
}

fn default_specialists() -> Vec<String> {
    vec![
        "http://localhost:8001".into(),
        "http://localhost:8002".into(),
    ]
}

fn default_discovery_timeout() -> u64 {
    5_000
}

fn default_forward_timeout() -> u64 {
    45_000
}

fn default_history_window() -> usize {
    10
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            specialists: default_specialists(),
            discovery_timeout_ms: default_discovery_timeout(),
            forward_timeout_ms: default_forward_timeout(),
            history_window: default_history_window(),
            llm: LlmConfig::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Load configuration from a TOML file.
    ///
    /// On Unix the file must be a regular file, not world-writable, and not
    /// world-readable when it carries an API key.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| CepnetError::Config(format!("invalid listen address: {e}")))
    }
}
