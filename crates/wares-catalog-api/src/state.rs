//! Application state for the catalog service.

use std::sync::Arc;

use wares_core::CatalogConfig;
use wares_storage_client::StorageApi;

use crate::auth::credentials::CredentialVerifier;
use crate::catalog::ProductCatalog;

pub struct AppState {
    pub config: CatalogConfig,
    pub products: Arc<dyn ProductCatalog>,
    pub storage: Arc<dyn StorageApi>,
    pub credentials: Arc<dyn CredentialVerifier>,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
