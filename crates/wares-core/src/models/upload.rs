use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Upload intent submitted by an authenticated catalog client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlRequest {
    /// Original filename, including extension
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    /// Content type (MIME type)
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// File size in bytes
    pub file_size: u64,
    /// Product the upload belongs to
    #[validate(length(min = 1, message = "Product id must not be empty"))]
    pub product_id: String,
}

/// Signed grant request the catalog service forwards to the storage service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresignedUrlRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "File name must be between 1 and 255 characters"
    ))]
    pub file_name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    pub file_size: u64,
    #[validate(length(min = 1, message = "Product id must not be empty"))]
    pub product_id: String,
    /// Base64 HMAC tag over the other four fields
    #[validate(length(min = 1, message = "Signature must not be empty"))]
    pub signature: String,
}

/// Response containing the upload URL and its time-boxed token.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlResponse {
    /// URL to POST the file to
    pub upload_url: String,
    /// Grant token (also embedded in the URL)
    pub token: Uuid,
    /// When the grant stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Response after a file has been consumed against a grant.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadCompletedResponse {
    pub image_id: Uuid,
}

/// Existence check for a stored image.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageValidationRequest {
    pub image_id: Uuid,
}
