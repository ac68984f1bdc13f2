use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;
use wares_core::models::{ApiResponse, LoginRequest, LoginResponse};
use wares_core::AppError;

use crate::auth::jwt;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Issue a bearer token for the single configured account.
#[tracing::instrument(skip(state, request), fields(username = %request.username, operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    if !state
        .credentials
        .verify(&request.username, &request.password)
    {
        tracing::warn!("Login failed");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()).into());
    }

    let (token, expires_at) = jwt::issue_token(
        &state.config.jwt_secret,
        &request.username,
        state.config.jwt_expiry_hours,
    )?;

    tracing::info!("Login successful");

    Ok(Json(ApiResponse::ok(
        "Login successful",
        LoginResponse { token, expires_at },
    )))
}
