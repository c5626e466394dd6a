//! Main entry point for the gateway service

use chaos_demo_gateway::{config::Settings, gateway::routes, upstream::HttpUpstream, AppState};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json())
        .init();

    info!("Starting chaos demo gateway");
    info!(
        upstream = %settings.upstream.base_url,
        "Loaded configuration: server={}:{}",
        settings.gateway.host, settings.gateway.port
    );

    // The upstream client is the gateway's single injected dependency
    let upstream = Arc::new(HttpUpstream::new(settings.upstream.base_url.clone())?);

    let addr = settings.gateway.bind_addr();
    let app_state = Arc::new(AppState { settings, upstream });

    // Build the router
    let app = routes::create_router(app_state);

    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
