//! LLM enrichment of a lookup result ("address analysis").

use std::sync::Arc;

use cepnet_common::{is_marked, mark};
use cepnet_llm::{LlmClient, ask};
use tracing::{info, warn};

use crate::lookup::PostalLookup;

pub const ANALYST_INSTRUCTIONS: &str = "🏠 Assistant specialized in Brazilian addresses. \
Analyze postal-code information, identify characteristics of the region and provide useful \
insights. Use emojis and be concise.";

/// Runs a lookup and asks the LLM to comment on it.
pub struct AddressAnalyst {
    lookup: Arc<PostalLookup>,
    llm: Arc<dyn LlmClient>,
}

impl AddressAnalyst {
    pub fn new(lookup: Arc<PostalLookup>, llm: Arc<dyn LlmClient>) -> Self {
        Self { lookup, llm }
    }

    fn prompt(basic: &str) -> String {
        format!(
            "Analyze this Brazilian address information: {basic}. Provide an analysis that \
             covers: type of region, characteristics of the area, geographic context and useful \
             information. Use emojis and be concise."
        )
    }

    /// Never fails: a failed lookup or LLM call is reported inside the text.
    pub async fn analyze(&self, raw: &str) -> String {
        info!(input = %raw, "Analyzing address");

        let basic = self.lookup.consult(raw).await;
        if is_marked(&basic) {
            return format!(
                "🧠 **Address Analysis**\n\n⚠️ Could not analyze because the basic lookup failed:\n\n{basic}"
            );
        }

        match ask(self.llm.as_ref(), Some(ANALYST_INSTRUCTIONS), Self::prompt(&basic)).await {
            Ok(insight) => {
                info!("Address analysis complete");
                format!(
                    "🧠 **Complete Address Analysis**\n\n📊 **BASIC DATA**\n{basic}\n\n🤖 **AI ANALYSIS**\n{insight}"
                )
            }
            Err(e) => {
                warn!(error = %e, "Enrichment failed, returning basic data");
                format!(
                    "🧠 **Address Analysis**\n\n✅ **Basic data:**\n{basic}\n\n{}",
                    mark(format!("**AI analysis error:** {e}"))
                )
            }
        }
    }
}
