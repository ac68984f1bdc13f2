//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so integration
//! tests can build the state and router with a stubbed storage client and
//! without installing a tracing subscriber.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use wares_core::{CatalogConfig, SignatureEngine};
use wares_storage_client::{StorageApi, StorageClient};

use crate::auth::credentials::StaticCredentials;
use crate::catalog::MemoryProductCatalog;
use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: CatalogConfig) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_tracing();

    tracing::info!(
        storage_base_url = %config.storage_base_url,
        "Configuration loaded and validated successfully"
    );

    let engine = SignatureEngine::new(config.upload_signing_secret.clone())
        .context("Failed to construct signature engine")?;
    let storage = Arc::new(
        StorageClient::new(config.storage_base_url.clone(), engine)
            .context("Failed to construct storage client")?,
    );

    let state = build_state(config, storage);
    let router = routes::build_router(state.clone());

    Ok((state, router))
}

/// Assemble application state around the given storage client.
pub fn build_state(config: CatalogConfig, storage: Arc<dyn StorageApi>) -> Arc<AppState> {
    let credentials = Arc::new(StaticCredentials::new(
        config.login_username.clone(),
        config.login_password.clone(),
    ));

    Arc::new(AppState {
        config,
        products: Arc::new(MemoryProductCatalog::new()),
        storage,
        credentials,
    })
}
