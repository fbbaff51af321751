//! HTTP gateway for the cepnet coordinator.
//!
//! # Endpoints
//!
//! - `GET /` - Health check with the discovered agent ids
//! - `GET /agents` - The discovered capability descriptors
//! - `POST /sse` - Route a chat turn through the coordinator
//!
//! ```text
//! cepnet-chat (terminal)
//!    │  POST /sse {input: {input, chat_history}}
//!    ▼
//! ┌─────────────────┐
//! │     Gateway     │ ◄── This crate
//! │     (Axum)      │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │   Coordinator   │ ──▶ specialists
//! └─────────────────┘
//! ```

pub mod client;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use client::{ChatSession, CoordinatorClient, DEFAULT_CHAT_TIMEOUT, DEFAULT_COORDINATOR_URL};
pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::health))
        .route("/agents", get(routes::list_agents))
        .route("/sse", post(routes::invoke))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let router = create_router(state);

    info!(%addr, "Starting coordinator gateway");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
