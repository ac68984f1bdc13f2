//! Test helpers: build storage-service state and router for integration tests.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;
use wares_core::signature::GrantClaims;
use wares_core::{SignatureEngine, StorageConfig};
use wares_storage_api::setup;

/// Shared secret both "sides" of the tests sign with.
pub const TEST_SECRET: &str = "storage-integration-secret";

/// Test application: server plus the owned upload directory.
pub struct TestApp {
    pub server: TestServer,
    pub _upload_dir: TempDir,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with_ttl(15).await
}

/// Build a test app with an explicit grant TTL so expiry paths can be
/// exercised end to end (a negative TTL mints already-expired grants).
pub async fn setup_test_app_with_ttl(grant_ttl_minutes: i64) -> TestApp {
    let upload_dir = TempDir::new().expect("create temp upload dir");

    let config = StorageConfig {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        public_base_url: "http://localhost:8081".to_string(),
        upload_signing_secret: TEST_SECRET.to_string(),
        upload_dir: upload_dir.path().display().to_string(),
        grant_ttl_minutes,
        max_upload_bytes: 10 * 1024 * 1024,
    };

    let state = setup::build_state(config).await.expect("build state");
    let router = setup::routes::build_router(state);

    TestApp {
        server: TestServer::new(router).expect("start test server"),
        _upload_dir: upload_dir,
    }
}

/// A presigned-url request body signed under `secret`.
pub fn grant_body_signed_with(
    secret: &str,
    file_name: &str,
    content_type: &str,
    file_size: u64,
    product_id: &str,
) -> serde_json::Value {
    let engine = SignatureEngine::new(secret).expect("engine");
    let signature = engine.sign(&GrantClaims {
        file_name,
        content_type,
        file_size,
        product_id,
    });

    serde_json::json!({
        "fileName": file_name,
        "contentType": content_type,
        "fileSize": file_size,
        "productId": product_id,
        "signature": signature,
    })
}

/// A presigned-url request body signed with the app's configured secret.
pub fn signed_grant_body(
    file_name: &str,
    content_type: &str,
    file_size: u64,
    product_id: &str,
) -> serde_json::Value {
    grant_body_signed_with(TEST_SECRET, file_name, content_type, file_size, product_id)
}

/// Multipart form with a single "file" part.
pub fn file_form(data: &[u8], file_name: &str, content_type: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(data.to_vec())
            .file_name(file_name)
            .mime_type(content_type),
    )
}
