//! LLM routing prompt and decision parsing.

use cepnet_common::CapabilityDescriptor;

/// Reply the LLM gives when no specialist fits.
pub const NO_SPECIALIST: &str = "NONE";

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Specialist(CapabilityDescriptor),
    /// The coordinator answers itself
    Fallback,
}

pub fn routing_prompt(message: &str, agents: &[CapabilityDescriptor]) -> String {
    let listing = agents
        .iter()
        .map(CapabilityDescriptor::routing_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an intelligent task router. Your job is to analyze a user request and choose \
the best specialist from a list.\n\n\
User request: \"{message}\"\n\n\
Available specialists:\n{listing}\n\n\
Based on the user request, what is the 'Agent ID' of the specialist best qualified for this task? \
Reply ONLY with the 'Agent ID' and nothing else.\n\
If no specialist is clearly suitable, reply with the word '{NO_SPECIALIST}'."
    )
}

/// Match the LLM's reply against the known agent ids.
///
/// The reply is trimmed and stripped of quote characters, then compared
/// exactly; the first matching descriptor in list order wins.
pub fn parse_decision(reply: &str, agents: &[CapabilityDescriptor]) -> RouteDecision {
    let chosen: String = reply
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '`'))
        .collect();
    let chosen = chosen.trim();

    if chosen == NO_SPECIALIST {
        return RouteDecision::Fallback;
    }

    agents
        .iter()
        .find(|card| card.agent_id == chosen)
        .cloned()
        .map(RouteDecision::Specialist)
        .unwrap_or(RouteDecision::Fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> CapabilityDescriptor {
        CapabilityDescriptor {
            agent_id: id.into(),
            name: format!("{id} name"),
            description: format!("{id} description"),
            version: "1.0.0".into(),
            invocation_endpoint: format!("http://localhost/{id}/sse"),
        }
    }

    #[test]
    fn prompt_lists_every_agent() {
        let agents = [card("consult_specialist_v1"), card("analysis_specialist_v1")];
        let prompt = routing_prompt("check 01310-100", &agents);

        assert!(prompt.contains("User request: \"check 01310-100\""));
        assert!(prompt.contains(
            "- Agent ID: 'consult_specialist_v1', Name: 'consult_specialist_v1 name'"
        ));
        assert!(prompt.contains("analysis_specialist_v1 description"));
        assert!(prompt.contains("'NONE'"));
    }

    #[test]
    fn quoted_id_is_matched() {
        let agents = [card("consult_specialist_v1"), card("analysis_specialist_v1")];

        assert_eq!(
            parse_decision("  'analysis_specialist_v1'\n", &agents),
            RouteDecision::Specialist(agents[1].clone())
        );
        assert_eq!(
            parse_decision("\"consult_specialist_v1\"", &agents),
            RouteDecision::Specialist(agents[0].clone())
        );
    }

    #[test]
    fn none_and_unknown_fall_back() {
        let agents = [card("consult_specialist_v1")];

        assert_eq!(parse_decision("NONE", &agents), RouteDecision::Fallback);
        assert_eq!(parse_decision("'NONE'", &agents), RouteDecision::Fallback);
        assert_eq!(
            parse_decision("I would pick consult_specialist_v1", &agents),
            RouteDecision::Fallback
        );
        assert_eq!(
            parse_decision("Consult_Specialist_V1", &agents),
            RouteDecision::Fallback
        );
        assert_eq!(parse_decision("", &agents), RouteDecision::Fallback);
    }

    #[test]
    fn duplicate_ids_resolve_to_first() {
        let mut second = card("consult_specialist_v1");
        second.name = "Second".into();
        let agents = [card("consult_specialist_v1"), second];

        match parse_decision("consult_specialist_v1", &agents) {
            RouteDecision::Specialist(chosen) => assert_eq!(chosen.name, "consult_specialist_v1 name"),
            other => panic!("unexpected decision: {other:?}"),
        }
    }
}
