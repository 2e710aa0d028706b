use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_route_server::config::ServerConfig;
use bus_route_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let backend = config.backend.build()?;
    info!(source = %config.backend, caching = config.cache.ttl.is_some(), "Network source ready");

    let state = AppState::new(backend, &config.cache, config.planner.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Bus route planner listening");
    info!("  GET  /health      - Health check");
    info!("  GET  /api/stops   - List stops");
    info!("  GET  /api/lines   - List lines");
    info!("  POST /api/nearest - Nearest stop to a point");
    info!("  POST /api/route   - Plan a route");

    axum::serve(listener, app).await?;
    Ok(())
}
