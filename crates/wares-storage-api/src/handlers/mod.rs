//! Request handlers for the storage service.

pub mod image_get;
pub mod presigned_url;
pub mod upload;
pub mod validate_image;

use axum::Json;
use wares_core::models::ApiResponse;

/// Liveness probe.
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok_empty("OK"))
}
