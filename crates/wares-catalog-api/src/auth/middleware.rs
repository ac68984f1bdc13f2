use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use wares_core::AppError;

use crate::auth::jwt;
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Bearer-token middleware for the protected routes.
///
/// On success the authenticated user is stored in request extensions for the
/// [`AuthUser`] extractor; on failure the request is rejected with a 401
/// envelope before reaching any handler.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let token = match bearer {
        Some(token) => token,
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing bearer token".to_string(),
            ))
            .into_response();
        }
    };

    match jwt::decode_token(&state.config.jwt_secret, token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser {
                username: claims.sub,
            });
            next.run(request).await
        }
        Err(err) => HttpAppError(err).into_response(),
    }
}
