//! The shared specialist pipeline: extract a postal code, call a tool,
//! post-process with the LLM.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cepnet_common::{CapabilityDescriptor, SpecialistResponse, is_marked, mark};
use cepnet_llm::{LlmClient, ask};
use tracing::{info, warn};

use crate::extract::extract_postal_code;
use crate::tool_client::ToolClient;
use crate::traits::Specialist;

/// Everything that distinguishes one specialist from another.
#[derive(Debug, Clone)]
pub struct SpecialistProfile {
    pub card: CapabilityDescriptor,
    /// Instructions sent with every LLM request
    pub instructions: &'static str,
    /// Tool server tool name, e.g. `consultar_cep`
    pub tool: &'static str,
    pub tool_timeout: Duration,
    /// Prompt wrapping a successful tool output
    pub tool_prompt: fn(&str) -> String,
    /// Prefix of a successful reply
    pub heading: Option<&'static str>,
    /// Prompt used when the message carries no postal code
    pub intro_prompt: fn(&str) -> String,
}

pub struct PostalSpecialist {
    profile: SpecialistProfile,
    tools: ToolClient,
    llm: Arc<dyn LlmClient>,
}

impl PostalSpecialist {
    pub fn new(profile: SpecialistProfile, tools: ToolClient, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            profile,
            tools,
            llm,
        }
    }

    pub fn profile(&self) -> &SpecialistProfile {
        &self.profile
    }

    async fn handle_postal_code(&self, cep: &str) -> SpecialistResponse {
        let profile = &self.profile;
        let output = self
            .tools
            .call_text(profile.tool, cep, profile.tool_timeout)
            .await;

        if is_marked(&output) {
            return SpecialistResponse::failed(output);
        }

        match ask(
            self.llm.as_ref(),
            Some(profile.instructions),
            (profile.tool_prompt)(&output),
        )
        .await
        {
            Ok(text) => {
                SpecialistResponse::ok(format!("{}{}", profile.heading.unwrap_or_default(), text))
            }
            Err(e) => {
                warn!(agent = %self.id(), error = %e, "Post-processing failed");
                SpecialistResponse::failed(mark(e))
            }
        }
    }

    async fn introduce(&self, message: &str) -> SpecialistResponse {
        let profile = &self.profile;
        match ask(
            self.llm.as_ref(),
            Some(profile.instructions),
            (profile.intro_prompt)(message),
        )
        .await
        {
            Ok(text) => SpecialistResponse::ok(text),
            Err(e) => {
                warn!(agent = %self.id(), error = %e, "Introduction failed");
                SpecialistResponse::failed(mark(e))
            }
        }
    }
}

#[async_trait]
impl Specialist for PostalSpecialist {
    fn card(&self) -> &CapabilityDescriptor {
        &self.profile.card
    }

    async fn handle_message(&self, message: &str) -> SpecialistResponse {
        match extract_postal_code(message) {
            Some(cep) => {
                info!(agent = %self.id(), cep, "Handling postal code request");
                self.handle_postal_code(cep).await
            }
            None => {
                info!(agent = %self.id(), "No postal code in message");
                self.introduce(message).await
            }
        }
    }
}
