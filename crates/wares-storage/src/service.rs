//! Upload orchestration.
//!
//! Composes the signature engine, grant store, and file store into the two
//! operations of the upload protocol: issuing a grant and consuming it with
//! a file. The signature is checked only at issuance; from then on the
//! unguessable token plus the expiry window is the trust anchor.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use uuid::Uuid;
use wares_core::models::PresignedUrlRequest;
use wares_core::signature::{GrantClaims, SignatureEngine};

use crate::files::{FileStore, FileStoreError};
use crate::grants::{GrantError, GrantStore, UploadGrant};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Grant(#[from] GrantError),

    #[error(transparent)]
    File(#[from] FileStoreError),
}

/// A file as it arrived at the upload endpoint.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

pub struct UploadService {
    engine: SignatureEngine,
    grants: Arc<dyn GrantStore>,
    files: FileStore,
    grant_ttl: Duration,
}

impl UploadService {
    pub fn new(
        engine: SignatureEngine,
        grants: Arc<dyn GrantStore>,
        files: FileStore,
        grant_ttl: Duration,
    ) -> Self {
        Self {
            engine,
            grants,
            files,
            grant_ttl,
        }
    }

    /// Verify the request signature and mint a time-boxed grant.
    ///
    /// On signature mismatch no record is created.
    pub async fn request_grant(
        &self,
        request: &PresignedUrlRequest,
    ) -> Result<UploadGrant, UploadError> {
        if !self
            .engine
            .verify(&GrantClaims::from(request), &request.signature)
        {
            tracing::warn!(file_name = %request.file_name, "Rejected grant request: invalid signature");
            return Err(GrantError::InvalidSignature.into());
        }

        let grant = self.grants.create(request, self.grant_ttl).await;
        Ok(grant)
    }

    /// Consume a grant with the uploaded file and return the new image id.
    ///
    /// The incoming file's name, content type, and byte length must exactly
    /// match what the grant was issued for; a client cannot switch payloads
    /// after obtaining a grant. A failed write releases the claim so the
    /// grant is left consumable, never half-marked.
    pub async fn consume_grant(
        &self,
        token: Uuid,
        incoming: IncomingFile,
    ) -> Result<Uuid, UploadError> {
        let grant = self.grants.claim(token, Utc::now()).await?;

        if incoming.file_name != grant.file_name
            || incoming.content_type != grant.content_type
            || incoming.bytes.len() as u64 != grant.file_size
        {
            tracing::warn!(
                token = %token,
                expected_name = %grant.file_name,
                got_name = %incoming.file_name,
                expected_size = grant.file_size,
                got_size = incoming.bytes.len(),
                "Rejected upload: file metadata does not match grant"
            );
            self.grants.release(token).await;
            return Err(GrantError::MetadataMismatch.into());
        }

        let (image_id, path) = match self.files.store(&grant, &incoming.bytes).await {
            Ok(stored) => stored,
            Err(e) => {
                self.grants.release(token).await;
                return Err(e.into());
            }
        };

        self.grants.complete(token, path).await?;

        tracing::info!(token = %token, image_id = %image_id, "Upload consumed");
        Ok(image_id)
    }

    pub async fn image_exists(&self, image_id: Uuid) -> bool {
        self.files.image_exists(image_id).await
    }

    pub async fn resolve_path(&self, image_id: Uuid) -> Option<PathBuf> {
        self.files.resolve_path(image_id).await
    }

    pub fn files(&self) -> &FileStore {
        &self.files
    }
}
