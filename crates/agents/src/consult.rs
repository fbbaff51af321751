//! Consult specialist: quick lookups formatted for the user.

use std::time::Duration;

use cepnet_common::CapabilityDescriptor;

use crate::specialist::SpecialistProfile;

pub const CONSULT_AGENT_ID: &str = "consult_specialist_v1";
pub const CONSULT_PORT: u16 = 8002;

const CONSULT_INSTRUCTIONS: &str = "📜 You are an assistant specialized in BASIC postal code lookups. \
Your task is to receive postal code data that was already looked up and format it \
clearly and usefully for the user.";

const CONSULT_DESCRIPTION: &str = "Specialist in quick, basic postal code lookups, returning \
street, neighborhood, city and state. Ideal when the user asks to 'look up' or 'check' a postal code.";

fn tool_prompt(output: &str) -> String {
    format!("Format this postal code response clearly and usefully: {output}")
}

fn intro_prompt(message: &str) -> String {
    format!(
        "The user said: '{message}'. Reply that you are a specialist in postal code lookups and ask for a postal code."
    )
}

pub fn consult_profile(invocation_endpoint: impl Into<String>) -> SpecialistProfile {
    SpecialistProfile {
        card: CapabilityDescriptor {
            agent_id: CONSULT_AGENT_ID.into(),
            name: "Postal Code Lookup Agent".into(),
            description: CONSULT_DESCRIPTION.into(),
            version: "1.0.0".into(),
            invocation_endpoint: invocation_endpoint.into(),
        },
        instructions: CONSULT_INSTRUCTIONS,
        tool: "consultar_cep",
        tool_timeout: Duration::from_secs(15),
        tool_prompt,
        heading: None,
        intro_prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_targets_lookup_tool() {
        let profile = consult_profile("http://localhost:8002/sse");
        assert_eq!(profile.card.agent_id, CONSULT_AGENT_ID);
        assert_eq!(profile.tool, "consultar_cep");
        assert_eq!(profile.tool_timeout, Duration::from_secs(15));
        assert!(profile.heading.is_none());
        assert!((profile.tool_prompt)("data").ends_with(": data"));
    }
}
