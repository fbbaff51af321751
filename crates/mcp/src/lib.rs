//! Tool server for Brazilian postal codes.
//!
//! Wraps the public ViaCEP API and an LLM enrichment call behind two plain
//! JSON-over-HTTP tools that the specialist agents call.
//!
//! # Tools Exposed
//!
//! - `POST /mcp/consultar_cep` - look up a postal code
//! - `POST /mcp/analisar_endereco` - look up a postal code and add an LLM analysis
//! - `GET /mcp/tools` - list the tools with their input schema
//!
//! ```text
//! Specialist agent
//!        │
//!        │ POST /mcp/<tool> {"cep": "..."}
//!        ▼
//! ┌─────────────────┐
//! │   Tool Server   │
//! │  ┌───────────┐  │
//! │  │  Lookup   │──┼──► ViaCEP
//! │  └─────┬─────┘  │
//! │  ┌─────▼─────┐  │
//! │  │  Analyst  │──┼──► LLM
//! │  └───────────┘  │
//! └─────────────────┘
//! ```

pub mod config;
pub mod enrich;
pub mod lookup;
pub mod server;
pub mod tools;

pub use config::McpServerConfig;
pub use enrich::AddressAnalyst;
pub use lookup::{AddressRecord, PostalLookup, normalize_postal_code};
pub use server::{ToolServer, create_router, serve};
pub use tools::{PostalCodeInput, Tool, ToolDescriptor};
