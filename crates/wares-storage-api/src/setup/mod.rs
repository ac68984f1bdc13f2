//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so integration
//! tests can build the state and router without starting a server or
//! installing a tracing subscriber.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use wares_core::{SignatureEngine, StorageConfig};
use wares_storage::{FileStore, MemoryGrantStore, MemoryImageIndex, UploadService};

use crate::state::AppState;

/// Initialize the entire application
pub async fn initialize_app(config: StorageConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_tracing();

    tracing::info!(
        upload_dir = %config.upload_dir,
        grant_ttl_minutes = config.grant_ttl_minutes,
        max_upload_mb = config.max_upload_bytes / 1024 / 1024,
        "Configuration loaded and validated successfully"
    );

    let state = build_state(config).await?;
    let router = routes::build_router(state.clone());

    Ok((state, router))
}

/// Wire up the signature engine, stores, and orchestrator.
pub async fn build_state(config: StorageConfig) -> Result<Arc<AppState>> {
    let engine = SignatureEngine::new(config.upload_signing_secret.clone())
        .context("Failed to construct signature engine")?;

    let grants = Arc::new(MemoryGrantStore::new());
    let index = Arc::new(MemoryImageIndex::new());
    let files = FileStore::new(&config.upload_dir, index)
        .await
        .context("Failed to prepare upload directory")?;

    let uploads = UploadService::new(
        engine,
        grants,
        files,
        Duration::minutes(config.grant_ttl_minutes),
    );

    Ok(Arc::new(AppState { config, uploads }))
}
