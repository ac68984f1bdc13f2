//! HTTP client for the wares storage service.
//!
//! The catalog service talks to the storage service through the [`StorageApi`]
//! trait so handlers can be tested against a stub. The real implementation
//! signs grant requests with the shared [`SignatureEngine`] and speaks the
//! `{success, message, data}` envelope. Calls are not retried; a transport
//! failure surfaces immediately to the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;
use wares_core::constants::API_PREFIX;
use wares_core::models::{
    ApiResponse, ImageValidationRequest, PresignedUrlRequest, UploadUrlRequest, UploadUrlResponse,
};
use wares_core::signature::{GrantClaims, SignatureEngine};

#[derive(Debug, thiserror::Error)]
pub enum StorageClientError {
    #[error("Failed to reach storage service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Storage service rejected the request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid response from storage service: {0}")]
    InvalidResponse(String),
}

/// Operations the catalog service needs from the storage service.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Sign the upload intent and request a grant.
    async fn request_upload_grant(
        &self,
        request: &UploadUrlRequest,
    ) -> Result<UploadUrlResponse, StorageClientError>;

    /// Check whether an image id refers to a stored file.
    async fn validate_image(&self, image_id: Uuid) -> Result<bool, StorageClientError>;
}

/// Reqwest-backed storage service client.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    engine: SignatureEngine,
}

impl StorageClient {
    pub fn new(base_url: String, engine: SignatureEngine) -> Result<Self, StorageClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(StorageClientError::Transport)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            engine,
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Read the envelope's message out of an error response, falling back to
    /// the raw body.
    async fn rejection(response: reqwest::Response) -> StorageClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
            .map(|envelope| envelope.message)
            .unwrap_or(body);
        StorageClientError::Rejected { status, message }
    }
}

#[async_trait]
impl StorageApi for StorageClient {
    async fn request_upload_grant(
        &self,
        request: &UploadUrlRequest,
    ) -> Result<UploadUrlResponse, StorageClientError> {
        let signature = self.engine.sign(&GrantClaims::from(request));
        let signed = PresignedUrlRequest {
            file_name: request.file_name.clone(),
            content_type: request.content_type.clone(),
            file_size: request.file_size,
            product_id: request.product_id.clone(),
            signature,
        };

        let url = self.build_url("/storage/presigned-url");
        let response = self.client.post(&url).json(&signed).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let envelope: ApiResponse<UploadUrlResponse> = response.json().await?;
        envelope.data.ok_or_else(|| {
            StorageClientError::InvalidResponse("grant response carried no data".to_string())
        })
    }

    async fn validate_image(&self, image_id: Uuid) -> Result<bool, StorageClientError> {
        let url = self.build_url("/storage/validate-image");
        let response = self
            .client
            .post(&url)
            .json(&ImageValidationRequest { image_id })
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(Self::rejection(response).await),
        }
    }
}
