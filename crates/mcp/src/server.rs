//! HTTP surface of the tool server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use cepnet_common::{ToolResponse, mark};
use cepnet_llm::LlmClient;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::McpServerConfig;
use crate::enrich::AddressAnalyst;
use crate::lookup::PostalLookup;
use crate::tools::{PostalCodeInput, Tool, ToolDescriptor};

/// The postal-code tool server.
pub struct ToolServer {
    lookup: Arc<PostalLookup>,
    analyst: AddressAnalyst,
}

impl ToolServer {
    pub fn new(config: &McpServerConfig, llm: Arc<dyn LlmClient>) -> Self {
        let lookup = Arc::new(PostalLookup::new(
            config.viacep_url.clone(),
            Duration::from_millis(config.lookup_timeout_ms),
        ));
        Self {
            analyst: AddressAnalyst::new(lookup.clone(), llm),
            lookup,
        }
    }

    /// Run `tool` on `input`; failures are carried in the output text.
    pub async fn call(&self, tool: Tool, input: PostalCodeInput) -> ToolResponse {
        info!(tool = tool.name(), cep = %input.cep, "Handling tool call");

        let output = match tool {
            Tool::ConsultarCep => self.lookup.consult(&input.cep).await,
            Tool::AnalisarEndereco => self.analyst.analyze(&input.cep).await,
        };

        ToolResponse::from_output(tool.qualified_name(), input.cep, output)
    }

    /// Parse a raw request body and run `tool` on it. A body that is not a
    /// JSON object with a string `cep` is answered with marked text.
    pub async fn call_raw(&self, tool: Tool, body: &[u8]) -> ToolResponse {
        match serde_json::from_slice::<PostalCodeInput>(body) {
            Ok(input) => self.call(tool, input).await,
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "Invalid payload");
                ToolResponse::from_output(
                    tool.qualified_name(),
                    String::new(),
                    mark(format!("Invalid payload: {e}")),
                )
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub tools: Vec<&'static str>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        service: "cepnet tool server",
        version: env!("CARGO_PKG_VERSION"),
        tools: Tool::ALL.iter().map(|t| t.name()).collect(),
    })
}

async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(Tool::ALL.iter().map(|t| t.descriptor()).collect())
}

// Bodies are parsed by hand so a bad payload still gets a 200 tool reply.
async fn consultar_cep(State(server): State<Arc<ToolServer>>, body: Bytes) -> Json<ToolResponse> {
    Json(server.call_raw(Tool::ConsultarCep, &body).await)
}

async fn analisar_endereco(
    State(server): State<Arc<ToolServer>>,
    body: Bytes,
) -> Json<ToolResponse> {
    Json(server.call_raw(Tool::AnalisarEndereco, &body).await)
}

pub fn create_router(server: Arc<ToolServer>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/mcp/tools", get(list_tools))
        .route(&Tool::ConsultarCep.path(), post(consultar_cep))
        .route(&Tool::AnalisarEndereco.path(), post(analisar_endereco))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

pub async fn serve(server: Arc<ToolServer>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(server);

    info!(%addr, "Starting tool server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
