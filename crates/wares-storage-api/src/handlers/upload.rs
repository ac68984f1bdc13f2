use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use wares_core::models::{ApiResponse, UploadCompletedResponse};
use wares_core::AppError;
use wares_storage::IncomingFile;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Extract the uploaded file from multipart form data.
/// Only one field named "file" is accepted; multiple file fields are rejected.
async fn extract_multipart_file(mut multipart: Multipart) -> Result<IncomingFile, AppError> {
    let mut incoming: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if incoming.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple file fields are not allowed; send exactly one field named 'file'"
                        .to_string(),
                ));
            }

            let file_name = field
                .file_name()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let content_type = field
                .content_type()
                .map(|s: &str| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());

            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            incoming = Some(IncomingFile {
                file_name,
                content_type,
                bytes,
            });
        }
    }

    let incoming = incoming.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    if incoming.bytes.is_empty() {
        return Err(AppError::BadRequest("No file provided".to_string()));
    }
    Ok(incoming)
}

/// Consume an upload grant with the posted file.
///
/// The token must name a pending, unexpired grant, and the file's name,
/// content type, and byte length must exactly match the grant.
#[tracing::instrument(skip(state, multipart), fields(token = %token, operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let token: Uuid = token
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid upload token".to_string()))?;

    let incoming = extract_multipart_file(multipart).await?;

    let image_id = state.uploads.consume_grant(token, incoming).await?;

    tracing::info!(image_id = %image_id, "File uploaded");

    Ok(Json(ApiResponse::ok(
        "File uploaded successfully",
        UploadCompletedResponse { image_id },
    )))
}
