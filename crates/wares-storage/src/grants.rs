//! Upload grant records and the grant store.
//!
//! A grant authorizes exactly one upload matching its declared attributes,
//! within a fixed expiry window. Consumption is a two-phase claim/complete so
//! that concurrent upload attempts on the same token have exactly one winner
//! and a failed file write rolls the record back to pending.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;
use wares_core::models::PresignedUrlRequest;

/// Lifecycle of a grant record.
///
/// `InFlight` is the transient claim state between a winning consumption
/// attempt and its outcome; it is never observable as "uploaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStatus {
    Pending,
    InFlight,
    Uploaded,
}

/// A stored upload grant. Records are never deleted; an expired or consumed
/// grant stays resident for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct UploadGrant {
    /// Primary key, handed to the caller as the upload token
    pub token: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub file_size: u64,
    pub product_id: String,
    /// Tag from the original request, retained for audit only
    pub signature: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: GrantStatus,
    /// Destination path, set once the upload completes
    pub file_path: Option<PathBuf>,
}

impl UploadGrant {
    pub fn is_uploaded(&self) -> bool {
        self.status == GrantStatus::Uploaded
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrantError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid upload token")]
    NotFound,

    #[error("Upload token has expired")]
    Expired,

    #[error("Upload token has already been used")]
    AlreadyUploaded,

    #[error("An upload for this token is already in progress")]
    UploadInProgress,

    #[error("File metadata does not match original request")]
    MetadataMismatch,
}

/// Storage abstraction for grant records.
///
/// Implementations must make `claim` atomic with respect to concurrent
/// callers: of any number of simultaneous claims on the same token, exactly
/// one receives the record, the rest observe a consistent rejection.
#[async_trait]
pub trait GrantStore: Send + Sync {
    /// Allocate a fresh token and store a pending grant. Token space is large
    /// enough that collisions are not handled.
    async fn create(&self, request: &PresignedUrlRequest, ttl: Duration) -> UploadGrant;

    /// Pure lookup. No expiry side effect; expiry is the caller's check.
    async fn get(&self, token: Uuid) -> Option<UploadGrant>;

    /// Atomically move a pending, unexpired grant to `InFlight` and return it.
    async fn claim(&self, token: Uuid, now: DateTime<Utc>) -> Result<UploadGrant, GrantError>;

    /// Mark a claimed grant uploaded and record its file path.
    async fn complete(&self, token: Uuid, path: PathBuf) -> Result<UploadGrant, GrantError>;

    /// Roll a claimed grant back to pending after a failed write.
    async fn release(&self, token: Uuid);
}

/// In-memory grant store.
///
/// All transitions happen under a single lock guard; no await point is
/// reached while the lock is held.
#[derive(Default)]
pub struct MemoryGrantStore {
    inner: RwLock<HashMap<Uuid, UploadGrant>>,
}

impl MemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GrantStore for MemoryGrantStore {
    async fn create(&self, request: &PresignedUrlRequest, ttl: Duration) -> UploadGrant {
        let now = Utc::now();
        let grant = UploadGrant {
            token: Uuid::new_v4(),
            file_name: request.file_name.clone(),
            content_type: request.content_type.clone(),
            file_size: request.file_size,
            product_id: request.product_id.clone(),
            signature: request.signature.clone(),
            created_at: now,
            expires_at: now + ttl,
            status: GrantStatus::Pending,
            file_path: None,
        };

        let mut guard = self.inner.write().expect("grant store lock poisoned");
        guard.insert(grant.token, grant.clone());

        tracing::info!(
            token = %grant.token,
            file_name = %grant.file_name,
            expires_at = %grant.expires_at,
            "Created upload grant"
        );

        grant
    }

    async fn get(&self, token: Uuid) -> Option<UploadGrant> {
        let guard = self.inner.read().expect("grant store lock poisoned");
        guard.get(&token).cloned()
    }

    async fn claim(&self, token: Uuid, now: DateTime<Utc>) -> Result<UploadGrant, GrantError> {
        let mut guard = self.inner.write().expect("grant store lock poisoned");
        let grant = guard.get_mut(&token).ok_or(GrantError::NotFound)?;

        // Expiry wins over every status, including already-uploaded.
        if grant.is_expired(now) {
            return Err(GrantError::Expired);
        }

        match grant.status {
            GrantStatus::Uploaded => Err(GrantError::AlreadyUploaded),
            GrantStatus::InFlight => Err(GrantError::UploadInProgress),
            GrantStatus::Pending => {
                grant.status = GrantStatus::InFlight;
                Ok(grant.clone())
            }
        }
    }

    async fn complete(&self, token: Uuid, path: PathBuf) -> Result<UploadGrant, GrantError> {
        let mut guard = self.inner.write().expect("grant store lock poisoned");
        let grant = guard.get_mut(&token).ok_or(GrantError::NotFound)?;

        grant.status = GrantStatus::Uploaded;
        grant.file_path = Some(path);
        Ok(grant.clone())
    }

    async fn release(&self, token: Uuid) {
        let mut guard = self.inner.write().expect("grant store lock poisoned");
        if let Some(grant) = guard.get_mut(&token) {
            if grant.status == GrantStatus::InFlight {
                grant.status = GrantStatus::Pending;
                tracing::warn!(token = %token, "Released claimed grant back to pending");
            }
        }
    }
}
