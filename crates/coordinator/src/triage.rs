//! The coordinator: route each request to a specialist or answer itself.

use std::sync::Arc;
use std::time::Duration;

use cepnet_common::{
    CapabilityDescriptor, CepnetError, ChatTurn, Result, SpecialistRequest, SpecialistResponse,
    mark,
};
use cepnet_llm::{ChatMessage, LlmClient, LlmRequest, ask};
use tracing::{debug, info, warn};

use crate::config::CoordinatorConfig;
use crate::discovery::discover;
use crate::routing::{RouteDecision, parse_decision, routing_prompt};

/// Name shown in the reply suffix when no specialist was used.
pub const COORDINATOR_NAME: &str = "Coordinator";

const NO_RESPONSE: &str = "The specialist agent did not return a response.";

const FALLBACK_INSTRUCTIONS: &str = "You are the coordinator of a network of postal code agents.";

const FALLBACK_APOLOGY: &str = "Sorry, I could not find a suitable specialist for this request \
and could not compose a reply. Please try again with a postal code, e.g. 01310-100.";

fn agent_used(text: &str, agent_name: &str) -> String {
    format!("{text}\n\n---\n*Agent used: {agent_name}*")
}

/// Routes requests across the specialists discovered at startup.
///
/// The descriptor list is fixed after construction.
pub struct Coordinator {
    config: CoordinatorConfig,
    agents: Vec<CapabilityDescriptor>,
    llm: Arc<dyn LlmClient>,
    http_client: reqwest::Client,
}

impl Coordinator {
    pub fn new(
        config: CoordinatorConfig,
        agents: Vec<CapabilityDescriptor>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            config,
            agents,
            llm,
            http_client: reqwest::Client::new(),
        }
    }

    /// Probe the configured specialists and build a coordinator over the
    /// ones that answered.
    pub async fn discover(config: CoordinatorConfig, llm: Arc<dyn LlmClient>) -> Self {
        let http_client = reqwest::Client::new();
        let agents = discover(
            &http_client,
            &config.specialists,
            Duration::from_millis(config.discovery_timeout_ms),
        )
        .await;

        Self {
            config,
            agents,
            llm,
            http_client,
        }
    }

    pub fn agents(&self) -> &[CapabilityDescriptor] {
        &self.agents
    }

    pub fn has_agents(&self) -> bool {
        !self.agents.is_empty()
    }

    /// Ask the LLM which specialist should handle `message`.
    pub async fn triage(&self, message: &str) -> RouteDecision {
        let prompt = routing_prompt(message, &self.agents);

        let decision = match ask(self.llm.as_ref(), None, prompt).await {
            Ok(reply) => {
                debug!(reply = %reply.trim(), "Routing reply");
                parse_decision(&reply, &self.agents)
            }
            Err(e) => {
                warn!(error = %e, "Routing failed, using fallback");
                RouteDecision::Fallback
            }
        };

        match &decision {
            RouteDecision::Specialist(card) => info!(agent = %card.agent_id, "Routed request"),
            RouteDecision::Fallback => info!("No suitable specialist"),
        }
        decision
    }

    /// Handle one user turn end to end. Never fails; errors become text.
    pub async fn respond(&self, message: &str, history: &[ChatTurn]) -> String {
        info!(
            content_preview = %message.chars().take(50).collect::<String>(),
            history = history.len(),
            "Handling request"
        );

        match self.triage(message).await {
            RouteDecision::Specialist(card) => match self.forward(&card, message).await {
                Ok(text) => agent_used(&text, &card.name),
                Err(e) => {
                    warn!(agent = %card.agent_id, error = %e, "Forwarding failed");
                    mark(format!(
                        "Sorry, there was an error contacting {}: {}",
                        card.name, e
                    ))
                }
            },
            RouteDecision::Fallback => self.fallback(message, history).await,
        }
    }

    /// Invoke a specialist and return its reply text.
    pub async fn forward(&self, card: &CapabilityDescriptor, message: &str) -> Result<String> {
        info!(endpoint = %card.invocation_endpoint, "Invoking specialist");

        let reply: SpecialistResponse = self
            .http_client
            .post(&card.invocation_endpoint)
            .json(&SpecialistRequest {
                message: message.to_string(),
            })
            .timeout(Duration::from_millis(self.config.forward_timeout_ms))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CepnetError::Agent(e.to_string()))?
            .json()
            .await
            .map_err(|e| CepnetError::Agent(e.to_string()))?;

        Ok(reply.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }

    /// Reply without a specialist, asking the user to be more specific.
    pub async fn fallback(&self, message: &str, history: &[ChatTurn]) -> String {
        // The chat front end records the current turn before sending it.
        let history = match history.split_last() {
            Some((last, earlier)) if last.role == "user" && last.content.trim() == message.trim() => {
                earlier
            }
            _ => history,
        };
        let start = history.len().saturating_sub(self.config.history_window);
        let mut messages: Vec<ChatMessage> = history[start..]
            .iter()
            .filter(|turn| !turn.content.is_empty())
            .map(|turn| match turn.role.as_str() {
                "assistant" => ChatMessage::assistant(&turn.content),
                _ => ChatMessage::user(&turn.content),
            })
            .collect();
        messages.push(ChatMessage::user(format!(
            "The user said: '{message}'. Reply that you are a coordinator of postal code agents, \
but did not find a specialist for this specific task right now. Ask the user to be more specific."
        )));

        let request = LlmRequest {
            system_prompt: Some(FALLBACK_INSTRUCTIONS.to_string()),
            messages,
            ..Default::default()
        };

        match self.llm.complete(request).await {
            Ok(response) if !response.content.trim().is_empty() => {
                agent_used(&response.content, COORDINATOR_NAME)
            }
            Ok(_) => {
                warn!("Fallback reply was empty");
                mark(FALLBACK_APOLOGY)
            }
            Err(e) => {
                warn!(error = %e, "Fallback reply failed");
                mark(FALLBACK_APOLOGY)
            }
        }
    }
}
