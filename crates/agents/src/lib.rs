//! Postal-code specialist agents.
//!
//! Two specialists share one pipeline and differ only by their
//! [`SpecialistProfile`]:
//!
//! - **Consult** (`consult_specialist_v1`, port 8002): basic lookups
//!   formatted by the LLM
//! - **Analysis** (`analysis_specialist_v1`, port 8001): the tool server's
//!   address analysis, complemented by the LLM
//!
//! ```text
//! POST /sse {message}
//!        │
//!        ▼
//!  extract postal code ──none──▶ LLM introduction
//!        │
//!        ▼
//!  POST tool server /mcp/<tool>
//!        │
//!   marked? ──yes──▶ {success: false, response: <tool output>}
//!        │
//!        ▼
//!  LLM post-processing ──▶ {success: true, response: <heading + text>}
//! ```

pub mod analysis;
pub mod config;
pub mod consult;
pub mod extract;
pub mod server;
pub mod specialist;
pub mod tool_client;
pub mod traits;

pub use analysis::{ANALYSIS_AGENT_ID, analysis_profile};
pub use config::{SpecialistConfig, SpecialistKind};
pub use consult::{CONSULT_AGENT_ID, consult_profile};
pub use extract::extract_postal_code;
pub use server::{SharedSpecialist, create_router, serve};
pub use specialist::{PostalSpecialist, SpecialistProfile};
pub use tool_client::ToolClient;
pub use traits::Specialist;
