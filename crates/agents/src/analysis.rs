//! Analysis specialist: complements the tool server's address analysis.

use std::time::Duration;

use cepnet_common::CapabilityDescriptor;

use crate::specialist::SpecialistProfile;

pub const ANALYSIS_AGENT_ID: &str = "analysis_specialist_v1";
pub const ANALYSIS_PORT: u16 = 8001;

const ANALYSIS_HEADING: &str = "🧠 **ADDITIONAL ANALYSIS**\n\n";

const ANALYSIS_INSTRUCTIONS: &str = "📜 You are an assistant specialized in DETAILED postal code \
analysis. Your task is to receive an analysis from the tool server and complement it with \
insights about development, trends and opportunities.";

const ANALYSIS_DESCRIPTION: &str = "Specialist in detailed address analysis from a postal code. \
Provides insights about the kind of region, characteristics of the area and geographic context. \
Ideal when the user asks to 'analyze' or 'detail' an address.";

fn tool_prompt(output: &str) -> String {
    format!("As a specialist, complement this postal code analysis: {output}.")
}

fn intro_prompt(message: &str) -> String {
    format!(
        "The user said: '{message}'. Reply that you are a specialist in detailed analyses and ask for a postal code."
    )
}

pub fn analysis_profile(invocation_endpoint: impl Into<String>) -> SpecialistProfile {
    SpecialistProfile {
        card: CapabilityDescriptor {
            agent_id: ANALYSIS_AGENT_ID.into(),
            name: "Address Analysis Agent".into(),
            description: ANALYSIS_DESCRIPTION.into(),
            version: "1.0.0".into(),
            invocation_endpoint: invocation_endpoint.into(),
        },
        instructions: ANALYSIS_INSTRUCTIONS,
        tool: "analisar_endereco",
        tool_timeout: Duration::from_secs(30),
        tool_prompt,
        heading: Some(ANALYSIS_HEADING),
        intro_prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_targets_analysis_tool() {
        let profile = analysis_profile("http://localhost:8001/sse");
        assert_eq!(profile.card.agent_id, ANALYSIS_AGENT_ID);
        assert_eq!(profile.card.invocation_endpoint, "http://localhost:8001/sse");
        assert_eq!(profile.tool, "analisar_endereco");
        assert_eq!(profile.tool_timeout, Duration::from_secs(30));
        assert_eq!(profile.heading, Some("🧠 **ADDITIONAL ANALYSIS**\n\n"));
        assert!((profile.tool_prompt)("data").contains("analysis: data."));
        assert!((profile.intro_prompt)("hello").contains("'hello'"));
    }
}
