use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use futures::StreamExt;
use uuid::Uuid;
use wares_core::AppError;
use wares_storage::content_type_for_path;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Serve a stored image's raw bytes, content type inferred from the stored
/// file's extension.
#[tracing::instrument(skip(state), fields(image_id = %image_id, operation = "get_image"))]
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Path(image_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let image_id: Uuid = image_id
        .parse()
        .map_err(|_| AppError::NotFound("Image not found".to_string()))?;

    let (path, stream) = state.uploads.files().open_stream(image_id).await?;

    tracing::debug!(path = %path.display(), "Serving image from disk");

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_path(&path))
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
