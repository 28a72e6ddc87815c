use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fare_server::config::ServerConfig;
use fare_server::store::GuideStore;
use fare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fare_server=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    // Load the guide before serving (fail fast if unavailable)
    let guides = match GuideStore::load(config.guide.clone()) {
        Ok(guides) => guides,
        Err(e) => {
            error!(error = %e, "Failed to load fare guide");
            std::process::exit(1);
        }
    };

    let state = AppState::new(guides, config.resolver.clone());
    let app = create_router(state);

    let addr = config.bind_addr;
    info!(%addr, "Fair Fares API listening");
    info!("  GET  /health                   - Health check");
    info!("  POST /fare/calculate           - Price a journey");
    info!("  GET  /fare/locations           - Locations of a district");
    info!("  GET  /fare/validate-location   - Check a location");
    info!("  GET  /guide/status             - Loaded guide summary");
    info!("  POST /guide/reload             - Reload the guide");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
