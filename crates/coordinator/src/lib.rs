//! LLM-routed coordinator for the postal-code specialists.
//!
//! ```text
//! User request
//!      │
//!      ▼
//! ┌─────────────────┐
//! │   Coordinator   │  ◄── LLM picks an agent id (or NONE)
//! │   (this crate)  │
//! └────────┬────────┘
//!          │ POST {invocation_endpoint}
//!    ┌─────┴──────┐
//!    ▼            ▼
//! [Consult]   [Analysis]        no match ──▶ LLM fallback reply
//!  :8002        :8001
//! ```
//!
//! Specialists are discovered once at startup from their `GET /card`
//! descriptors.

pub mod config;
pub mod discovery;
pub mod routing;
pub mod triage;

pub use config::CoordinatorConfig;
pub use discovery::{discover, fetch_card};
pub use routing::{NO_SPECIALIST, RouteDecision, parse_decision, routing_prompt};
pub use triage::{COORDINATOR_NAME, Coordinator};
