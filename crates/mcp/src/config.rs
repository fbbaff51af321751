//! Configuration for the tool server.

use std::net::SocketAddr;
use std::path::Path;

use cepnet_common::{CepnetError, Result, load_toml};
use cepnet_llm::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::lookup::DEFAULT_VIACEP_URL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the ViaCEP API
    #[serde(default = "default_viacep_url")]
    pub viacep_url: String,

    /// Timeout for a single postal-code lookup
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_ms: u64,

    /// Model used to enrich lookups with commentary
    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8000
}

fn default_viacep_url() -> String {
    DEFAULT_VIACEP_URL.into()
}

fn default_lookup_timeout() -> u64 {
    10_000
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            viacep_url: default_viacep_url(),
            lookup_timeout_ms: default_lookup_timeout(),
            llm: LlmConfig::default(),
        }
    }
}

impl McpServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| CepnetError::Config(format!("invalid listen address: {e}")))
    }
}
