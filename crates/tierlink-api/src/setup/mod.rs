//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tierlink_catalog::build_http_client;
use tierlink_core::Config;

/// Validate configuration, install telemetry and build the application.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    tierlink_infra::init_telemetry(
        config.log_format,
        env!("CARGO_PKG_NAME"),
        &config.environment,
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        catalog_api_url = %config.catalog_api_url,
        formats = %config.format_names.join(","),
        synchronous_processing = config.synchronous_processing,
        "Configuration loaded and validated successfully"
    );

    build_app(config)
}

/// Build state and router without touching global telemetry.
pub fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let http_client = build_http_client(config.catalog_timeout())
        .context("Failed to create HTTP client")?;
    let state = Arc::new(AppState::new(config, http_client));
    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
