//! Wares Storage Library
//!
//! Storage-side domain logic: upload grants, the image index, disk-backed
//! file persistence, and the upload orchestrator that composes them.
//!
//! # State model
//!
//! Grant records and the image index live in process memory behind small
//! traits so a persistent backing store can be substituted without touching
//! the orchestration logic. Uploaded bytes are the only durable state and
//! live under the configured upload directory, named `{image_id}.{ext}`.

pub mod files;
pub mod grants;
pub mod images;
pub mod service;

// Re-export commonly used types
pub use files::{content_type_for_path, FileStore, FileStoreError};
pub use grants::{GrantError, GrantStore, GrantStatus, MemoryGrantStore, UploadGrant};
pub use images::{ImageIndex, MemoryImageIndex};
pub use service::{IncomingFile, UploadError, UploadService};
