use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;
use wares_core::models::{ApiResponse, UploadUrlRequest};
use wares_core::AppError;

use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Forward a signed grant request to the storage service and hand the
/// resulting upload URL back to the caller.
#[tracing::instrument(
    skip(state, request),
    fields(
        username = %user.username,
        file_name = %request.file_name,
        product_id = %request.product_id,
        operation = "request_upload_url"
    )
)]
pub async fn request_upload_url(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(request): Json<UploadUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let grant = state.storage.request_upload_grant(&request).await?;

    tracing::info!(token = %grant.token, "Upload URL generated");

    Ok(Json(ApiResponse::ok(
        "Upload URL generated successfully",
        grant,
    )))
}
