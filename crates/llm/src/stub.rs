//! An offline [`LlmClient`] that answers from a fixed script.
//!
//! Selected with `provider = "static"`, and used by the test suites of the
//! other crates in place of a real model.

use std::collections::VecDeque;

use async_trait::async_trait;
use cepnet_common::{CepnetError, Result};
use parking_lot::Mutex;

use crate::client::{LlmClient, LlmRequest, LlmResponse};

const STATIC_MODEL: &str = "static";

/// Older requests are dropped once this many are held.
pub const RECORDED_REQUESTS: usize = 32;

enum Reply {
    Text(String),
    Fail(String),
}

/// Replies with scripted texts in order, repeating the last one forever.
pub struct StaticClient {
    script: Mutex<VecDeque<Reply>>,
    requests: Mutex<VecDeque<LlmRequest>>,
}

impl StaticClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted([text.into()])
    }

    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_replies(replies.into_iter().map(|s| Reply::Text(s.into())).collect())
    }

    /// Every call fails with an LLM error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_replies(VecDeque::from([Reply::Fail(message.into())]))
    }

    fn from_replies(script: VecDeque<Reply>) -> Self {
        Self {
            script: Mutex::new(script),
            requests: Mutex::new(VecDeque::with_capacity(RECORDED_REQUESTS)),
        }
    }

    /// The most recent requests, oldest first, at most [`RECORDED_REQUESTS`].
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().iter().cloned().collect()
    }

    /// The last user message of the most recent request.
    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .back()
            .and_then(|r| r.last_user_message().map(str::to_string))
    }

    fn next_reply(&self) -> Result<String> {
        let mut script = self.script.lock();
        let popped = if script.len() > 1 {
            script.pop_front()
        } else {
            None
        };
        match popped.as_ref().or(script.front()) {
            Some(Reply::Text(text)) => Ok(text.clone()),
            Some(Reply::Fail(message)) => Err(CepnetError::Llm(message.clone())),
            None => Err(CepnetError::Llm("static client has no replies".to_string())),
        }
    }
}

#[async_trait]
impl LlmClient for StaticClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        {
            let mut requests = self.requests.lock();
            if requests.len() == RECORDED_REQUESTS {
                requests.pop_front();
            }
            requests.push_back(request);
        }
        let content = self.next_reply()?;
        Ok(LlmResponse {
            content,
            model: STATIC_MODEL.to_string(),
            usage: None,
            finish_reason: Some("stop".to_string()),
        })
    }

    fn model_name(&self) -> &str {
        STATIC_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn reply(client: &StaticClient) -> Result<String> {
        client
            .complete(LlmRequest::prompt(None, "hi"))
            .await
            .map(|r| r.content)
    }

    #[tokio::test]
    async fn script_repeats_last_reply() {
        let client = StaticClient::scripted(["first", "second"]);
        assert_eq!(reply(&client).await.unwrap(), "first");
        assert_eq!(reply(&client).await.unwrap(), "second");
        assert_eq!(reply(&client).await.unwrap(), "second");
        assert_eq!(client.requests().len(), 3);
    }

    #[tokio::test]
    async fn failing_client_records_requests() {
        let client = StaticClient::failing("quota exceeded");
        let err = reply(&client).await.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        assert_eq!(client.last_prompt().as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn request_log_is_bounded() {
        let client = StaticClient::replying("NONE");
        for i in 0..(RECORDED_REQUESTS * 4) {
            client
                .complete(LlmRequest::prompt(None, format!("prompt {i}")))
                .await
                .unwrap();
        }

        let requests = client.requests();
        assert_eq!(requests.len(), RECORDED_REQUESTS);
        assert_eq!(
            requests[0].last_user_message(),
            Some(format!("prompt {}", RECORDED_REQUESTS * 3).as_str())
        );
        assert_eq!(
            client.last_prompt(),
            Some(format!("prompt {}", RECORDED_REQUESTS * 4 - 1))
        );
    }
}
