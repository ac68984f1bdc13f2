//! Test helpers: build catalog-service state and router against a stubbed
//! storage service.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;
use wares_catalog_api::setup;
use wares_core::models::{UploadUrlRequest, UploadUrlResponse};
use wares_core::CatalogConfig;
use wares_storage_client::{StorageApi, StorageClientError};

pub const TEST_USERNAME: &str = "seller";
pub const TEST_PASSWORD: &str = "password123";

/// Stub storage service: a settable set of known image ids, plus an offline
/// switch to exercise the upstream-failure path.
#[derive(Default)]
pub struct StubStorage {
    known_images: Mutex<HashSet<Uuid>>,
    offline: bool,
}

impl StubStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self {
            known_images: Mutex::new(HashSet::new()),
            offline: true,
        }
    }

    /// Register an image id the stub will report as existing.
    pub fn add_image(&self, image_id: Uuid) {
        self.known_images
            .lock()
            .expect("stub lock poisoned")
            .insert(image_id);
    }
}

#[async_trait]
impl StorageApi for StubStorage {
    async fn request_upload_grant(
        &self,
        _request: &UploadUrlRequest,
    ) -> Result<UploadUrlResponse, StorageClientError> {
        if self.offline {
            return Err(StorageClientError::InvalidResponse(
                "stub storage is offline".to_string(),
            ));
        }
        let token = Uuid::new_v4();
        Ok(UploadUrlResponse {
            upload_url: format!("http://storage.test/api/storage/upload/{}", token),
            token,
            expires_at: Utc::now() + Duration::minutes(15),
        })
    }

    async fn validate_image(&self, image_id: Uuid) -> Result<bool, StorageClientError> {
        if self.offline {
            return Err(StorageClientError::InvalidResponse(
                "stub storage is offline".to_string(),
            ));
        }
        Ok(self
            .known_images
            .lock()
            .expect("stub lock poisoned")
            .contains(&image_id))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<StubStorage>,
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with_storage(Arc::new(StubStorage::new()))
}

pub fn setup_test_app_with_storage(storage: Arc<StubStorage>) -> TestApp {
    let config = CatalogConfig {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        storage_base_url: "http://storage.test".to_string(),
        upload_signing_secret: "catalog-integration-secret".to_string(),
        jwt_secret: "catalog-integration-jwt-secret".to_string(),
        jwt_expiry_hours: 1,
        login_username: TEST_USERNAME.to_string(),
        login_password: TEST_PASSWORD.to_string(),
    };

    let state = setup::build_state(config, storage.clone());
    let router = setup::routes::build_router(state);

    TestApp {
        server: TestServer::new(router).expect("start test server"),
        storage,
    }
}

/// Log in with the configured account and return the bearer token.
pub async fn login(app: &TestApp) -> String {
    let response = app
        .server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": TEST_USERNAME,
            "password": TEST_PASSWORD,
        }))
        .await;
    assert_eq!(response.status_code(), 200);

    let envelope = response.json::<Value>();
    envelope["data"]["token"]
        .as_str()
        .expect("login token")
        .to_string()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
