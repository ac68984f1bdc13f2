//! Storage service integration tests.
//!
//! Run with: `cargo test -p wares-storage-api --test upload_flow_test`

mod helpers;

use chrono::{DateTime, Duration, Utc};
use helpers::{
    file_form, grant_body_signed_with, setup_test_app, setup_test_app_with_ttl, signed_grant_body,
};
use serde_json::Value;

async fn request_grant(app: &helpers::TestApp, body: &Value) -> Value {
    let response = app.server.post("/api/storage/presigned-url").json(body).await;
    assert_eq!(response.status_code(), 200);
    response.json::<Value>()
}

#[tokio::test]
async fn test_full_upload_flow() {
    let app = setup_test_app().await;
    let data = vec![7u8; 1024];

    // Request a grant
    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 1024, "prod-1"),
    )
    .await;
    assert_eq!(envelope["success"], true);

    let grant = &envelope["data"];
    let token = grant["token"].as_str().expect("token").to_string();
    let upload_url = grant["uploadUrl"].as_str().expect("uploadUrl");
    assert!(upload_url.ends_with(&format!("/api/storage/upload/{}", token)));

    // Expiry sits inside the 15 minute window
    let expires_at: DateTime<Utc> = grant["expiresAt"]
        .as_str()
        .expect("expiresAt")
        .parse()
        .expect("RFC 3339 timestamp");
    let remaining = expires_at - Utc::now();
    assert!(remaining > Duration::minutes(14));
    assert!(remaining <= Duration::minutes(15));

    // Upload the file against the token
    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(&data, "photo.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 200);
    let envelope = response.json::<Value>();
    let image_id = envelope["data"]["imageId"].as_str().expect("imageId").to_string();

    // The image now validates
    let response = app
        .server
        .post("/api/storage/validate-image")
        .json(&serde_json::json!({ "imageId": image_id }))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["message"], "Image exists");

    // And its bytes come back with the right content type
    let response = app
        .server
        .get(&format!("/api/storage/image/{}", image_id))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), data.as_slice());
}

#[tokio::test]
async fn test_wrong_secret_rejected_before_any_grant() {
    let app = setup_test_app().await;

    let body = grant_body_signed_with("wrong-secret", "photo.png", "image/png", 1024, "prod-1");
    let response = app.server.post("/api/storage/presigned-url").json(&body).await;

    assert_eq!(response.status_code(), 400);
    let envelope = response.json::<Value>();
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "Invalid signature");
    assert!(envelope["data"].is_null());
}

#[tokio::test]
async fn test_size_mismatch_rejected_and_no_image_created() {
    let app = setup_test_app().await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 1024, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    // Upload 2048 bytes against a 1024-byte grant
    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(&vec![7u8; 2048], "photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "File metadata does not match original request"
    );
}

#[tokio::test]
async fn test_content_type_mismatch_rejected() {
    let app = setup_test_app().await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 4, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(b"data", "photo.png", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "File metadata does not match original request"
    );
}

#[tokio::test]
async fn test_unknown_token_rejected() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", uuid::Uuid::new_v4()))
        .multipart(file_form(b"data", "photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["message"], "Invalid upload token");
}

#[tokio::test]
async fn test_malformed_token_rejected() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/storage/upload/not-a-token")
        .multipart(file_form(b"data", "photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["message"], "Invalid upload token");
}

#[tokio::test]
async fn test_expired_token_rejected() {
    // Grants from this app are already expired when minted
    let app = setup_test_app_with_ttl(-1).await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 4, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(b"data", "photo.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "Upload token has expired"
    );
}

#[tokio::test]
async fn test_double_upload_rejected() {
    let app = setup_test_app().await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 4, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(b"data", "photo.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(b"data", "photo.png", "image/png"))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>()["message"],
        "Upload token has already been used"
    );
}

#[tokio::test]
async fn test_missing_file_part_rejected() {
    let app = setup_test_app().await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("photo.png", "image/png", 4, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    let form = axum_test::multipart::MultipartForm::new().add_text("note", "no file here");
    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["message"], "No file provided");
}

#[tokio::test]
async fn test_validate_unknown_image() {
    let app = setup_test_app().await;

    let response = app
        .server
        .post("/api/storage/validate-image")
        .json(&serde_json::json!({ "imageId": uuid::Uuid::new_v4() }))
        .await;

    assert_eq!(response.status_code(), 404);
    let envelope = response.json::<Value>();
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["message"], "Image not found");
}

#[tokio::test]
async fn test_get_unknown_image() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get(&format!("/api/storage/image/{}", uuid::Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_unrecognized_extension_served_as_octet_stream() {
    let app = setup_test_app().await;

    let envelope = request_grant(
        &app,
        &signed_grant_body("scan.tiff", "image/tiff", 4, "prod-1"),
    )
    .await;
    let token = envelope["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .server
        .post(&format!("/api/storage/upload/{}", token))
        .multipart(file_form(b"data", "scan.tiff", "image/tiff"))
        .await;
    assert_eq!(response.status_code(), 200);
    let image_id = response.json::<Value>()["data"]["imageId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .server
        .get(&format!("/api/storage/image/{}", image_id))
        .await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/octet-stream");
}
