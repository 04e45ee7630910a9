mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;
mod utils;

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use routes::create_app;
use services::{
    register_server_info, spawn_reload_on_hangup, InMemoryRegistry, PropertiesMetrics,
    RuntimeVersionService, SystemConfig,
};
use state::AppState;
use utils::shutdown_signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "system_sample=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        Settings::default()
    });

    tracing::info!("Starting system sample server...");
    tracing::info!("Configuration: {:?}", settings);

    // Publish the server info entry the runtime endpoint reads
    let registry = Arc::new(InMemoryRegistry::new());
    let server_version = settings.runtime.server_version();
    register_server_info(
        &registry,
        &settings.runtime.object_name,
        &settings.runtime.version_attribute,
        &server_version,
    )?;
    tracing::info!(
        "Registered {} with {}={}",
        settings.runtime.object_name,
        settings.runtime.version_attribute,
        server_version
    );

    let runtime_version_service = Arc::new(RuntimeVersionService::new(
        registry.clone(),
        settings.runtime.object_name.clone(),
        settings.runtime.version_attribute.clone(),
    ));

    let system_config = Arc::new(SystemConfig::new(settings.system.in_maintenance));
    if let Err(e) = spawn_reload_on_hangup(system_config.clone(), registry) {
        tracing::warn!("Failed to install SIGHUP handler: {}", e);
    }

    let metrics = PropertiesMetrics::new()?;

    let app_state = AppState::new(system_config, runtime_version_service, metrics, &settings);
    let app = create_app(app_state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
