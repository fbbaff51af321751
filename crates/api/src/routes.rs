//! HTTP route handlers for the gateway.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use cepnet_common::{
    CapabilityDescriptor, CoordinatorRequest, CoordinatorResponse, ErrorBody,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::AppState;

/// An error answered with a status code and `{error}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
}

impl ApiError {
    fn bad_request(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
        }
    }

    fn unavailable(error: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            error: error.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.error })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub discovered_agents: Vec<String>,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "online",
        service: "cepnet coordinator",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        discovered_agents: state
            .coordinator
            .agents()
            .iter()
            .map(|card| card.agent_id.clone())
            .collect(),
    })
}

/// The descriptors discovered at startup.
pub async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<CapabilityDescriptor>> {
    Json(state.coordinator.agents().to_vec())
}

/// Route one chat turn through the coordinator.
///
/// The body is parsed by hand so malformed JSON is answered with the same
/// `{error}` shape as an empty message.
pub async fn invoke(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CoordinatorResponse>, ApiError> {
    let request: CoordinatorRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Invalid payload");
        ApiError::bad_request(format!("Invalid payload: {e}"))
    })?;

    let message = request.input.input.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request(
            "Field 'input.input' is required in the payload.",
        ));
    }

    if !state.coordinator.has_agents() {
        return Err(ApiError::unavailable(
            "No specialist agent is available at the moment.",
        ));
    }

    info!(
        content_preview = %message.chars().take(50).collect::<String>(),
        "Received message"
    );

    let output = state
        .coordinator
        .respond(message, &request.input.chat_history)
        .await;

    Ok(Json(CoordinatorResponse::text(output)))
}
