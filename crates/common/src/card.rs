//! Capability descriptors ("agent cards") published by specialists.

use serde::{Deserialize, Serialize};

/// Metadata a specialist exposes about itself and how to invoke it.
///
/// The coordinator fetches one of these per specialist at startup and keeps
/// it unchanged for the rest of its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    #[serde(alias = "id")]
    pub agent_id: String,

    pub name: String,

    /// Free text the routing prompt shows to the LLM
    pub description: String,

    pub version: String,

    /// Full URL of the specialist's invocation endpoint
    #[serde(alias = "endpoint")]
    pub invocation_endpoint: String,
}

impl CapabilityDescriptor {
    /// One line of the routing prompt describing this specialist.
    pub fn routing_line(&self) -> String {
        format!(
            "- Agent ID: '{}', Name: '{}', Description: {}",
            self.agent_id, self.name, self.description
        )
    }
}
