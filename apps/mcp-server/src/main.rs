use anyhow::{Context, Result};
use mcp_hyperliquid::{Config, HyperliquidServer};
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; stdout carries the MCP stream
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    let client = config.client()?;

    info!("🚀 MCP Hyperliquid server running on stdio");
    info!("👤 Wallet: {}", client.wallet_address());
    info!("📡 Network: {}", client.network());

    let service = HyperliquidServer::new(client)
        .serve(stdio())
        .await
        .context("Failed to start MCP service")?;

    service.waiting().await?;
    info!("MCP session closed");

    Ok(())
}
