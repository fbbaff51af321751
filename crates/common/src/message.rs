//! JSON bodies exchanged between the chat front end, the coordinator, the
//! specialists and the tool server.
//!
//! Every incoming field defaults to empty so a sparse payload still parses;
//! the handlers decide what an empty value means.

use serde::{Deserialize, Serialize};

use crate::marker::is_marked;

/// Body of `POST /mcp/<tool>` on the tool server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolRequest {
    #[serde(default)]
    pub cep: String,
}

/// Reply of a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    pub success: bool,
    /// Qualified tool name, e.g. `mcp:consultar_cep`
    pub tool: String,
    pub input: String,
    pub output: String,
}

impl ToolResponse {
    /// Build a reply whose `success` flag is derived from the output text.
    pub fn from_output(tool: impl Into<String>, input: impl Into<String>, output: String) -> Self {
        Self {
            success: !is_marked(&output),
            tool: tool.into(),
            input: input.into(),
            output,
        }
    }
}

/// Body of `POST /sse` on a specialist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialistRequest {
    #[serde(default)]
    pub message: String,
}

/// Reply of a specialist invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
}

impl SpecialistResponse {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: Some(response.into()),
        }
    }

    pub fn failed(response: impl Into<String>) -> Self {
        Self {
            success: false,
            response: Some(response.into()),
        }
    }
}

/// One prior turn of the conversation, as sent by the chat front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// `user` or `assistant`
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorInput {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
}

/// Body of `POST /sse` on the coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorRequest {
    #[serde(default)]
    pub input: CoordinatorInput,
}

impl CoordinatorRequest {
    pub fn new(message: impl Into<String>, chat_history: Vec<ChatTurn>) -> Self {
        Self {
            input: CoordinatorInput {
                input: message.into(),
                chat_history,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorOutput {
    #[serde(default)]
    pub output: String,
}

/// Reply of the coordinator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoordinatorResponse {
    #[serde(default)]
    pub output: CoordinatorOutput,
}

impl CoordinatorResponse {
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            output: CoordinatorOutput {
                output: output.into(),
            },
        }
    }
}

/// Body of the coordinator's 400 and 503 replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
