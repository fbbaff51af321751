//! The trait every specialist agent implements.

use async_trait::async_trait;
use cepnet_common::{CapabilityDescriptor, SpecialistResponse};

#[async_trait]
pub trait Specialist: Send + Sync {
    /// The descriptor published on `GET /card`; identical on every call.
    fn card(&self) -> &CapabilityDescriptor;

    fn id(&self) -> &str {
        &self.card().agent_id
    }

    fn name(&self) -> &str {
        &self.card().name
    }

    /// Handle one invocation. Failures are reported inside the response.
    async fn handle_message(&self, message: &str) -> SpecialistResponse;
}
