//! Coordinator gateway binary.
//!
//! Discovers the configured specialists once, then serves `POST /sse`.
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY` - API key for routing and fallback replies
//! - `RUST_LOG` - log filter

use std::path::PathBuf;
use std::sync::Arc;

use cepnet_api::{AppState, serve};
use cepnet_coordinator::{Coordinator, CoordinatorConfig};
use cepnet_llm::build_llm_client;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// LLM-routed coordinator for the postal-code specialists.
#[derive(Parser, Debug)]
#[command(name = "cepnet-coordinator", version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Specialist base URL to discover; repeat for several (overrides config)
    #[arg(short, long = "specialist")]
    specialists: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cepnet_api=debug,cepnet_coordinator=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            CoordinatorConfig::from_file(&path)?
        }
        None => CoordinatorConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if !args.specialists.is_empty() {
        config.specialists = args.specialists;
    }

    let addr = config.socket_addr()?;
    let llm = build_llm_client(&config.llm)?;

    info!(urls = ?config.specialists, "Discovering specialists");
    let coordinator = Coordinator::discover(config, llm).await;
    if !coordinator.has_agents() {
        warn!("No specialists discovered; POST /sse will answer 503");
    }

    serve(Arc::new(AppState::new(coordinator)), addr).await
}
