//! Request handlers for the catalog service.

pub mod auth;
pub mod products;
pub mod upload;

use axum::Json;
use wares_core::models::ApiResponse;

/// Liveness probe.
pub async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok_empty("OK"))
}
