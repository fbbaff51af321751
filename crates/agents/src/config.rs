//! Specialist process configuration.

use std::net::SocketAddr;
use std::path::Path;

use cepnet_common::{CepnetError, Result, load_toml};
use cepnet_llm::LlmConfig;
use serde::{Deserialize, Serialize};

use crate::analysis::{ANALYSIS_PORT, analysis_profile};
use crate::consult::{CONSULT_PORT, consult_profile};
use crate::specialist::SpecialistProfile;
use crate::tool_client::DEFAULT_TOOL_SERVER_URL;

/// Which specialist a process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpecialistKind {
    Consult,
    Analysis,
}

impl SpecialistKind {
    pub fn default_port(self) -> u16 {
        match self {
            Self::Consult => CONSULT_PORT,
            Self::Analysis => ANALYSIS_PORT,
        }
    }

    pub fn profile(self, invocation_endpoint: String) -> SpecialistProfile {
        match self {
            Self::Consult => consult_profile(invocation_endpoint),
            Self::Analysis => analysis_profile(invocation_endpoint),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistConfig {
    pub kind: SpecialistKind,

    #[serde(default = "default_bind")]
    pub bind: String,

    /// Defaults to the kind's well-known port
    #[serde(default)]
    pub port: Option<u16>,

    /// Base URL advertised in the capability descriptor
    #[serde(default)]
    pub public_url: Option<String>,

    #[serde(default = "default_tool_server_url")]
    pub tool_server_url: String,

    #[serde(default)]
    pub llm: LlmConfig,
}

fn default_bind() -> String {
    "127.0.0.1".into()
}

fn default_tool_server_url() -> String {
    DEFAULT_TOOL_SERVER_URL.into()
}

impl SpecialistConfig {
    pub fn new(kind: SpecialistKind) -> Self {
        Self {
            kind,
            bind: default_bind(),
            port: None,
            public_url: None,
            tool_server_url: default_tool_server_url(),
            llm: LlmConfig::default(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_toml(path)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.kind.default_port())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port())
            .parse()
            .map_err(|e| CepnetError::Config(format!("invalid listen address: {e}")))
    }

    /// Full URL other processes use to invoke this specialist.
    pub fn invocation_endpoint(&self) -> String {
        let base = match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port()),
        };
        format!("{base}/sse")
    }

    pub fn profile(&self) -> SpecialistProfile {
        self.kind.profile(self.invocation_endpoint())
    }
}
