//! HTTP client for the coordinator gateway.

use std::time::Duration;

use cepnet_common::{
    CepnetError, ChatTurn, CoordinatorRequest, CoordinatorResponse, Result, mark,
};
use tracing::debug;

pub const DEFAULT_COORDINATOR_URL: &str = "http://localhost:8004";

/// Matches the slowest specialist path.
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(45);

pub struct CoordinatorClient {
    endpoint: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl CoordinatorClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            endpoint: format!("{}/sse", base_url.trim_end_matches('/')),
            timeout,
            http_client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message with the conversation so far.
    pub async fn send(&self, message: &str, chat_history: &[ChatTurn]) -> Result<String> {
        debug!(endpoint = %self.endpoint, history = chat_history.len(), "Sending message");

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&CoordinatorRequest::new(message, chat_history.to_vec()))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CepnetError::Coordinator(format!("unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CepnetError::Coordinator(format!("HTTP error {status}: {body}")));
        }

        let reply: CoordinatorResponse = response
            .json()
            .await
            .map_err(|e| CepnetError::Coordinator(format!("invalid reply: {e}")))?;
        Ok(reply.output.output)
    }
}

/// A conversation with the coordinator, keeping the local history.
pub struct ChatSession {
    client: CoordinatorClient,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(client: CoordinatorClient) -> Self {
        Self {
            client,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Send `message` and return the text to display.
    ///
    /// The user turn is recorded before sending; the reply is recorded only
    /// when the coordinator answered, so transport errors stay out of the
    /// history.
    pub async fn send(&mut self, message: &str) -> String {
        self.history.push(ChatTurn::user(message));

        match self.client.send(message, &self.history).await {
            Ok(reply) => {
                self.history.push(ChatTurn::assistant(&reply));
                reply
            }
            Err(e) => mark(e),
        }
    }
}
