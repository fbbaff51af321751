//! Specialist agent binary.

use std::path::PathBuf;
use std::sync::Arc;

use cepnet_agents::{PostalSpecialist, SpecialistConfig, SpecialistKind, ToolClient, serve};
use cepnet_llm::build_llm_client;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Postal-code specialist agent.
#[derive(Parser, Debug)]
#[command(name = "cepnet-specialist", version, about)]
struct Args {
    /// Which specialist to run (overrides config)
    #[arg(short, long, value_enum)]
    kind: Option<SpecialistKind>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Tool server base URL (overrides config)
    #[arg(long)]
    tool_server: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cepnet_agents=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match (&args.config, args.kind) {
        (Some(path), _) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            SpecialistConfig::from_file(path)?
        }
        (None, Some(kind)) => SpecialistConfig::new(kind),
        (None, None) => anyhow::bail!("either --kind or --config is required"),
    };
    if let Some(kind) = args.kind {
        config.kind = kind;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(port) = args.port {
        config.port = Some(port);
    }
    if let Some(url) = args.tool_server {
        config.tool_server_url = url;
    }

    let llm = build_llm_client(&config.llm)?;
    let specialist = PostalSpecialist::new(
        config.profile(),
        ToolClient::new(config.tool_server_url.clone()),
        llm,
    );

    serve(Arc::new(specialist), config.socket_addr()?).await
}
