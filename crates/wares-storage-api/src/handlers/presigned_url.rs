use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;
use wares_core::constants::API_PREFIX;
use wares_core::models::{ApiResponse, PresignedUrlRequest, UploadUrlResponse};
use wares_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Verify the request signature and mint a time-boxed upload grant.
///
/// A signature mismatch is rejected before any grant record is created.
#[tracing::instrument(
    skip(state, request),
    fields(
        file_name = %request.file_name,
        product_id = %request.product_id,
        operation = "generate_presigned_url"
    )
)]
pub async fn generate_presigned_url(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PresignedUrlRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let grant = state.uploads.request_grant(&request).await?;

    let upload_url = format!(
        "{}{}/storage/upload/{}",
        state.config.public_base_url.trim_end_matches('/'),
        API_PREFIX,
        grant.token
    );

    tracing::info!(token = %grant.token, expires_at = %grant.expires_at, "Pre-signed URL generated");

    Ok(Json(ApiResponse::ok(
        "Pre-signed URL generated successfully",
        UploadUrlResponse {
            upload_url,
            token: grant.token,
            expires_at: grant.expires_at,
        },
    )))
}
