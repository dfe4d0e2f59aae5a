//! HTTP server for the OpenPhone MCP adapter.
//!
//! This module wires the endpoint table onto an axum `Router` and runs it
//! until the process receives Ctrl-C.

pub mod handlers;

pub use handlers::{OpenPhoneMcpServer, ServiceInfo};

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the router with every adapter endpoint.
pub fn router(server: OpenPhoneMcpServer) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/mcp/info", get(handlers::info))
        .route("/mcp/search", post(handlers::search))
        .route("/mcp/fetch", post(handlers::fetch))
        .route("/mcp/tools/send-sms", post(handlers::send_sms))
        .route("/mcp/tools/make-call", post(handlers::make_call))
        .route("/mcp/tools/messages", get(handlers::list_messages))
        .route("/mcp/tools/contacts", get(handlers::list_contacts))
        .route("/mcp/tools/calls", get(handlers::list_calls))
        .route("/mcp/tools/phone-numbers", get(handlers::list_phone_numbers))
        .route("/mcp/tools/create-contact", post(handlers::create_contact))
        .route("/webhooks/openphone", post(handlers::openphone_webhook))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(server)
}

/// Serve the adapter on an already-bound listener.
///
/// Returns once a shutdown signal has been received and in-flight requests
/// have drained.
pub async fn run_server(server: OpenPhoneMcpServer, listener: TcpListener) -> Result<()> {
    let app = router(server);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
