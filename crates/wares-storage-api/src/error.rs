//! HTTP error response conversion
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or types that implement `Into<HttpAppError>`) for errors and
//! `?` so they render consistently (status, envelope body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use wares_core::models::ApiResponse;
use wares_core::{AppError, ErrorMetadata, LogLevel};
use wares_storage::{FileStoreError, GrantError, UploadError};

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from wares-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<GrantError> for HttpAppError {
    fn from(err: GrantError) -> Self {
        let app = match err {
            GrantError::InvalidSignature => AppError::InvalidSignature,
            // The Display messages are the client-facing reasons
            GrantError::NotFound
            | GrantError::Expired
            | GrantError::AlreadyUploaded
            | GrantError::UploadInProgress
            | GrantError::MetadataMismatch => AppError::BadRequest(err.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<FileStoreError> for HttpAppError {
    fn from(err: FileStoreError) -> Self {
        let app = match err {
            FileStoreError::NotFound(_) => AppError::NotFound("Image not found".to_string()),
            other => AppError::Storage(other.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Grant(e) => e.into(),
            UploadError::File(e) => e.into(),
        }
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(
                error = %error.detailed_message(),
                error_type = error_type,
                "Request failed"
            );
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // The client sees only the safe message; sensitive variants already
        // collapse to a generic one via ErrorMetadata.
        let body = Json(ApiResponse::failure(app_error.client_message()));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_grant_errors_map_to_bad_request() {
        let HttpAppError(app) = GrantError::Expired.into();
        assert_eq!(app.http_status_code(), 400);
        assert_eq!(app.client_message(), "Upload token has expired");

        let HttpAppError(app) = GrantError::MetadataMismatch.into();
        assert_eq!(
            app.client_message(),
            "File metadata does not match original request"
        );
    }

    #[test]
    fn test_invalid_signature_keeps_its_code() {
        let HttpAppError(app) = GrantError::InvalidSignature.into();
        assert_eq!(app.error_code(), "INVALID_SIGNATURE");
        assert_eq!(app.http_status_code(), 400);
    }

    #[test]
    fn test_file_store_errors() {
        let HttpAppError(app) = FileStoreError::NotFound(Uuid::new_v4()).into();
        assert_eq!(app.http_status_code(), 404);

        let io = std::io::Error::other("disk on fire");
        let HttpAppError(app) = FileStoreError::WriteFailed {
            path: "uploads/x.png".to_string(),
            source: io,
        }
        .into();
        assert_eq!(app.http_status_code(), 500);
        // Write failure detail never reaches the client
        assert_eq!(app.client_message(), "Failed to access storage");
    }
}
