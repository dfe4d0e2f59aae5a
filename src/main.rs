//! OpenPhone MCP Adapter - Main entry point
//!
//! Serves the adapter's HTTP endpoints, forwarding to the OpenPhone API.

use anyhow::{Context, Result};
use openphone_mcp_adapter::client::{AsyncOpenPhoneClient, AsyncOpenPhoneClientImpl};
use openphone_mcp_adapter::server::{self, OpenPhoneMcpServer};
use openphone_mcp_adapter::{Config, OpenPhoneClient};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config_result = Config::from_env();

    let fallback_level = config_result
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config_result {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Starting OpenPhone MCP Adapter with API URL: {}",
        config.openphone_api_url
    );

    let client_impl = AsyncOpenPhoneClientImpl::new(OpenPhoneClient::new(&config));
    let metrics = client_impl.metrics().clone();
    let client = Arc::new(client_impl) as Arc<dyn AsyncOpenPhoneClient>;

    let server = OpenPhoneMcpServer::with_metrics(client, metrics.clone());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on http://{}", address);
    info!("Upstream timeout: {} seconds", config.request_timeout);

    server::run_server(server, listener).await?;

    let snapshot = metrics.snapshot();
    info!(
        upstream_calls = snapshot.upstream_calls,
        upstream_failures = snapshot.upstream_failures,
        avg_ms = snapshot.upstream_avg_ms,
        searches = snapshot.searches,
        skipped_messages = snapshot.skipped_messages,
        skipped_contacts = snapshot.skipped_contacts,
        skipped_calls = snapshot.skipped_calls,
        "Upstream usage"
    );
    info!("OpenPhone MCP Adapter shutdown complete");
    Ok(())
}
