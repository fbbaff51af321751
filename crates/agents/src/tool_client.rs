//! HTTP client for the tool server.

use std::time::Duration;

use cepnet_common::{CepnetError, Result, ToolRequest, mark};
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_TOOL_SERVER_URL: &str = "http://localhost:8000";

pub struct ToolClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ToolClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call `tool` with `cep` and return the tool's `output` text.
    pub async fn call(&self, tool: &str, cep: &str, timeout: Duration) -> Result<String> {
        let url = format!("{}/mcp/{}", self.base_url, tool);
        debug!(%url, cep, "Calling tool server");

        let body: Value = self
            .http_client
            .post(&url)
            .json(&ToolRequest {
                cep: cep.to_string(),
            })
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CepnetError::Mcp(e.to_string()))?
            .json()
            .await
            .map_err(|e| CepnetError::Mcp(e.to_string()))?;

        body.get("output")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| CepnetError::Mcp("response has no output".to_string()))
    }

    /// Like [`call`](Self::call), with failures returned as marked text.
    pub async fn call_text(&self, tool: &str, cep: &str, timeout: Duration) -> String {
        match self.call(tool, cep, timeout).await {
            Ok(output) => output,
            Err(e) => {
                warn!(tool, error = %e, "Tool call failed");
                mark(e)
            }
        }
    }
}
