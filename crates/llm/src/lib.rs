pub mod client;
pub mod config;
pub mod openai;
pub mod stub;

pub use client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, Role, TokenUsage, ask};
pub use config::{DeadlineClient, LlmConfig, build_llm_client};
pub use openai::OpenAiClient;
pub use stub::StaticClient;
