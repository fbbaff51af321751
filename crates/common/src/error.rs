//! Error types for cepnet.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CepnetError {
    #[error("Invalid postal code: '{0}'. Use format: 01310-100")]
    InvalidPostalCode(String),

    #[error("Postal code {0} not found")]
    NotFound(String),

    #[error("Lookup failed: {0}")]
    Upstream(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Timed out after {0} ms")]
    Timeout(u64),

    #[error("Error calling tool server: {0}")]
    Mcp(String),

    #[error("Specialist error: {0}")]
    Agent(String),

    #[error("Coordinator error: {0}")]
    Coordinator(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CepnetError>;
