use anyhow::{Context, Result};
use ecss_navigator::{api, config, logging, service::NavigatorService};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing("ecss-navigator");
    let config = Arc::new(config::init_config().context("failed to load configuration")?);

    let service = NavigatorService::new(config.clone()).context("failed to build HTTP client")?;
    let app = api::create_router(Arc::new(service), &config.cors_allowed_origins);

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;
    tracing::info!(port = config.server_port, "Starting ECSS Standards Navigator API server");
    tracing::info!("  GET /api/search?q=<query> - Search ECSS documents");
    tracing::info!("  GET /api/documents - List all documents");
    tracing::info!("  GET /api/health - Health check");

    axum::serve(listener, app).await.context("HTTP server terminated")?;
    Ok(())
}
