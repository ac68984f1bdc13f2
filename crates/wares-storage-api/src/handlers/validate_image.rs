use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use wares_core::models::{ApiResponse, ImageValidationRequest};
use wares_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Existence check for a stored image: the id must be known and the file
/// still present on disk.
#[tracing::instrument(skip(state, request), fields(image_id = %request.image_id, operation = "validate_image"))]
pub async fn validate_image(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ImageValidationRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if state.uploads.image_exists(request.image_id).await {
        Ok(Json(ApiResponse::ok_empty("Image exists")))
    } else {
        Err(AppError::NotFound("Image not found".to_string()).into())
    }
}
