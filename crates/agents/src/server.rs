//! HTTP surface shared by every specialist.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use cepnet_common::{CapabilityDescriptor, SpecialistRequest, SpecialistResponse, mark};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::traits::Specialist;

pub type SharedSpecialist = Arc<dyn Specialist>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub id: String,
}

async fn health(State(agent): State<SharedSpecialist>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        service: agent.name().to_string(),
        id: agent.id().to_string(),
    })
}

async fn card(State(agent): State<SharedSpecialist>) -> Json<CapabilityDescriptor> {
    Json(agent.card().clone())
}

/// Invocation endpoint. A malformed body is reported in a 200 reply like
/// any other failure.
async fn invoke(State(agent): State<SharedSpecialist>, body: Bytes) -> Json<SpecialistResponse> {
    match serde_json::from_slice::<SpecialistRequest>(&body) {
        Ok(request) => Json(agent.handle_message(&request.message).await),
        Err(e) => {
            warn!(agent = %agent.id(), error = %e, "Invalid payload");
            Json(SpecialistResponse::failed(mark(format!("Invalid payload: {e}"))))
        }
    }
}

pub fn create_router(agent: SharedSpecialist) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/card", get(card))
        .route("/sse", post(invoke))
        .layer(TraceLayer::new_for_http())
        .with_state(agent)
}

pub async fn serve(agent: SharedSpecialist, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(agent.clone());

    info!(%addr, agent = %agent.id(), name = %agent.name(), "Starting specialist");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
