mod auth;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use pulseboard_core::{
    ConfigLoader,
    CoreContext,
};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    pulseboard_core::logging::init();

    tracing::info!("Starting Pulseboard API server");

    let config_path = ConfigLoader::discover_config_path();
    let config = ConfigLoader::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("Config warning: {}", warning);
    }
    if !validation.is_ok() {
        for error in &validation.errors {
            tracing::error!("Config error: {}", error);
        }
        anyhow::bail!("Invalid configuration: {}", validation.summary());
    }

    let bind_addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address: {}", config.server.bind_addr))?;
    let cors_allow_all = config.server.cors_allow_all;

    tracing::info!(
        apps = config.apps.len(),
        region = %config.aws.region,
        "Configuration loaded from {}",
        config_path.display()
    );

    let core = CoreContext::from_config(config)
        .await
        .context("Failed to initialize metric sources")?;

    let app = routes::app(AppState::new(core), cors_allow_all);

    tracing::info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
