//! Application state for the storage service.

use wares_core::StorageConfig;
use wares_storage::UploadService;

pub struct AppState {
    pub config: StorageConfig,
    pub uploads: UploadService,
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
