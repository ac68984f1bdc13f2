//! Shared constants for the catalog and storage services.

/// API path prefix for both services.
pub const API_PREFIX: &str = "/api";

/// How long an issued upload grant stays valid, in minutes.
pub const DEFAULT_GRANT_TTL_MINUTES: i64 = 15;

/// Upper bound for a single uploaded file, in bytes (100 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Default lifetime of a login bearer token, in hours.
pub const DEFAULT_JWT_EXPIRY_HOURS: i64 = 1;
