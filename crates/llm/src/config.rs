use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cepnet_common::{CepnetError, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::openai::OpenAiClient;
use crate::stub::StaticClient;

const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "openai" (any OpenAI-compatible endpoint) or "static"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Falls back to `OPENAI_API_KEY` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Deadline for a single completion call
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Reply used by the "static" provider
    #[serde(default)]
    pub static_reply: Option<String>,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            api_url: None,
            temperature: None,
            max_tokens: None,
            timeout_ms: default_timeout_ms(),
            static_reply: None,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config, then from `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

/// Fails any completion that runs past a fixed deadline.
pub struct DeadlineClient {
    inner: Arc<dyn LlmClient>,
    deadline: Duration,
}

impl DeadlineClient {
    pub fn new(inner: Arc<dyn LlmClient>, deadline: Duration) -> Self {
        Self { inner, deadline }
    }
}

#[async_trait]
impl LlmClient for DeadlineClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        tokio::time::timeout(self.deadline, self.inner.complete(request))
            .await
            .map_err(|_| CepnetError::Timeout(self.deadline.as_millis() as u64))?
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

pub fn build_llm_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>> {
    let base_client: Arc<dyn LlmClient> = match config.provider.as_str() {
        "openai" => {
            let api_key = config.resolve_api_key();
            if api_key.is_none() {
                warn!(
                    "No API key configured and {} is not set; requests will be sent unauthenticated",
                    API_KEY_ENV
                );
            }
            Arc::new(
                OpenAiClient::new(config.api_url.clone(), config.model.clone(), api_key)
                    .with_defaults(config.temperature, config.max_tokens),
            )
        }
        "static" => Arc::new(StaticClient::replying(
            config
                .static_reply
                .clone()
                .unwrap_or_else(|| "LLM running in static mode.".to_string()),
        )),
        other => {
            return Err(CepnetError::Config(format!(
                "Unknown LLM provider: {other}"
            )));
        }
    };

    info!(
        provider = %config.provider,
        model = %base_client.model_name(),
        timeout_ms = config.timeout_ms,
        "LLM client ready"
    );

    Ok(Arc::new(DeadlineClient::new(
        base_client,
        Duration::from_millis(config.timeout_ms),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_CONFIG: &str = r#"
provider = "openai"
model = "llama3"
api_url = "http://localhost:11434/v1"
timeout_ms = 5000
temperature = 0.3
"#;

    #[test]
    fn deserialize_config_from_toml() {
        let config: LlmConfig = toml::from_str(TOML_CONFIG).unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "llama3");
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:11434/v1"));
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.temperature, Some(0.3));
    }

    #[test]
    fn deserialize_config_defaults() {
        let config: LlmConfig = toml::from_str("").unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_ms, 30_000);
    }

    #[test]
    fn explicit_key_wins() {
        let config = LlmConfig {
            api_key: Some("sk-config".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-config"));
    }

    #[test]
    fn build_openai_client() {
        let config = LlmConfig {
            model: "llama3".to_string(),
            ..Default::default()
        };
        let client = build_llm_client(&config).unwrap();
        assert_eq!(client.model_name(), "llama3");
    }

    #[tokio::test]
    async fn build_static_client() {
        let config = LlmConfig {
            provider: "static".to_string(),
            static_reply: Some("NONE".to_string()),
            ..Default::default()
        };
        let client = build_llm_client(&config).unwrap();
        let reply = client.complete(LlmRequest::prompt(None, "route")).await.unwrap();
        assert_eq!(reply.content, "NONE");
    }

    #[test]
    fn build_unknown_provider_fails() {
        let config = LlmConfig {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            build_llm_client(&config),
            Err(CepnetError::Config(_))
        ));
    }

    #[tokio::test]
    async fn deadline_client_times_out_slow_calls() {
        struct SlowClient;

        #[async_trait]
        impl LlmClient for SlowClient {
            async fn complete(&self, _request: LlmRequest) -> Result<LlmResponse> {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(LlmResponse {
                    content: "late".to_string(),
                    model: "slow".to_string(),
                    usage: None,
                    finish_reason: None,
                })
            }
            fn model_name(&self) -> &str {
                "slow"
            }
        }

        let client = DeadlineClient::new(Arc::new(SlowClient), Duration::from_millis(20));
        let err = client.complete(LlmRequest::default()).await.unwrap_err();
        assert!(matches!(err, CepnetError::Timeout(20)));
        assert_eq!(client.model_name(), "slow");
    }
}
