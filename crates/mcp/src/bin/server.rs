//! Tool server binary.

use std::path::PathBuf;
use std::sync::Arc;

use cepnet_llm::build_llm_client;
use cepnet_mcp::{McpServerConfig, ToolServer, serve};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Postal-code tool server (ViaCEP lookup and LLM analysis).
#[derive(Parser, Debug)]
#[command(name = "cepnet-mcp", version, about)]
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
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cepnet_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            McpServerConfig::from_file(&path)?
        }
        None => McpServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let llm = build_llm_client(&config.llm)?;
    let server = Arc::new(ToolServer::new(&config, llm));

    serve(server, config.socket_addr()?).await
}
