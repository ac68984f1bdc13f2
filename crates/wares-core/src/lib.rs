//! Wares Core Library
//!
//! This crate provides the domain models, error types, configuration, and the
//! upload signature engine shared by the catalog and storage services.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod signature;

// Re-export commonly used types
pub use config::{CatalogConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use signature::{GrantClaims, SignatureEngine, SignatureError};
