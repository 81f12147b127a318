//! mention-scout server binary.
//!
//! Loads configuration, starts the HTTP server and runs until Ctrl-C.

use clap::Parser;
use mention_scout::{MentionServer, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Web mention scraper API.
#[derive(Parser)]
#[command(name = "mention-scout", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Users can override with RUST_LOG=debug to see everything.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mention_scout=info,mention_search=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => ServerConfig::from_file(path)?,
        None => {
            let path = ServerConfig::default_config_path();
            if path.exists() {
                ServerConfig::from_file(&path)?
            } else {
                ServerConfig::default()
            }
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let server = MentionServer::start(&config).await.map_err(|e| {
        tracing::error!(error = %e, "mention-scout failed to start");
        anyhow::anyhow!("mention-scout failed: {e}")
    })?;

    tracing::info!(port = server.port(), "mention-scout started");

    tokio::signal::ctrl_c().await?;
    server.shutdown();

    tracing::info!("mention-scout shut down cleanly");
    Ok(())
}
