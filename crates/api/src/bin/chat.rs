//! Terminal chat front end for the coordinator.

use anyhow::Result;
use cepnet_api::{ChatSession, CoordinatorClient, DEFAULT_CHAT_TIMEOUT, DEFAULT_COORDINATOR_URL};
use clap::Parser;
use rustyline::error::ReadlineError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Chat with the postal-code coordinator.
#[derive(Parser, Debug)]
#[command(name = "cepnet-chat", version, about)]
struct Args {
    /// Coordinator base URL
    #[arg(short, long, default_value = DEFAULT_COORDINATOR_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_CHAT_TIMEOUT.as_secs())]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let client = CoordinatorClient::new(&args.url, std::time::Duration::from_secs(args.timeout));

    println!("Postal code chat - connected to {}", client.endpoint());
    println!("Try: Analyze postal code 13571-385 (Ctrl+D to exit)");
    println!("---");

    let mut session = ChatSession::new(client);
    let mut editor = rustyline::DefaultEditor::new()?;

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                let reply = session.send(line).await;
                println!("{reply}\n");
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
