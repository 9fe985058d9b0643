use oldrao::config::Config;
use oldrao::events::RegistryHandle;
use oldrao::http;
use oldrao::lifecycle::{setup_tracing, RestaurantSystem, StartupError};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    setup_tracing();

    let config = Config::load()?;
    info!(?config, "Configuration loaded");

    let mut system = RestaurantSystem::start(config.actor_buffer);
    system.sweep_sessions_every(config.session_sweep_interval());
    system.seed_admin(&config).await?;

    let app = http::router(system.app_state(&config), &config.public_dir);
    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(system.registry.clone()))
        .await?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C. Event streams never end on their own, so the
/// registry is closed first to let the server drain.
async fn shutdown_signal(registry: RegistryHandle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
    registry.shutdown();
}
