//! Configuration module
//!
//! Configuration for both services is loaded from environment variables
//! (with `.env` support via dotenvy). Each service validates its config at
//! startup and fails fast on misconfiguration; in particular an empty upload
//! signing secret is a startup error so signing never silently degrades.

use std::env;

use crate::constants::{
    DEFAULT_GRANT_TTL_MINUTES, DEFAULT_JWT_EXPIRY_HOURS, DEFAULT_MAX_UPLOAD_BYTES,
};

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn parse_cors_origins() -> Vec<String> {
    env_or("CORS_ORIGINS", "*")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Configuration for the catalog (application) service.
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Base URL of the storage service, e.g. `http://localhost:8081`.
    pub storage_base_url: String,
    /// Shared secret for signing upload grant requests. Must match the
    /// storage service's secret.
    pub upload_signing_secret: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    /// Credentials for the single built-in account.
    pub login_username: String,
    pub login_password: String,
}

impl CatalogConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(CatalogConfig {
            server_port: env_parse("PORT", 8080),
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            cors_origins: parse_cors_origins(),
            storage_base_url: env_or("STORAGE_BASE_URL", "http://localhost:8081"),
            upload_signing_secret: env_or("UPLOAD_SIGNING_SECRET", ""),
            jwt_secret: env_or("JWT_SECRET", ""),
            jwt_expiry_hours: env_parse("JWT_EXPIRY_HOURS", DEFAULT_JWT_EXPIRY_HOURS),
            login_username: env_or("LOGIN_USERNAME", "seller"),
            login_password: env_or("LOGIN_PASSWORD", "password123"),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_signing_secret.is_empty() {
            anyhow::bail!("UPLOAD_SIGNING_SECRET must be set");
        }
        if self.jwt_secret.len() < 16 {
            anyhow::bail!("JWT_SECRET must be set and at least 16 characters");
        }
        if self.jwt_expiry_hours <= 0 {
            anyhow::bail!("JWT_EXPIRY_HOURS must be positive");
        }
        if self.storage_base_url.is_empty() {
            anyhow::bail!("STORAGE_BASE_URL must be set");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Configuration for the storage service.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Externally reachable base URL used when rendering upload URLs.
    pub public_base_url: String,
    /// Shared secret for verifying upload grant requests. Must match the
    /// catalog service's secret.
    pub upload_signing_secret: String,
    /// Directory where uploaded files are written. Created at startup if absent.
    pub upload_dir: String,
    pub grant_ttl_minutes: i64,
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        Ok(StorageConfig {
            server_port: env_parse("PORT", 8081),
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or_else(|_| "development".to_string()),
            cors_origins: parse_cors_origins(),
            public_base_url: env_or("PUBLIC_BASE_URL", "http://localhost:8081"),
            upload_signing_secret: env_or("UPLOAD_SIGNING_SECRET", ""),
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            grant_ttl_minutes: env_parse("GRANT_TTL_MINUTES", DEFAULT_GRANT_TTL_MINUTES),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_signing_secret.is_empty() {
            anyhow::bail!("UPLOAD_SIGNING_SECRET must be set");
        }
        if self.upload_dir.is_empty() {
            anyhow::bail!("UPLOAD_DIR must be set");
        }
        if self.grant_ttl_minutes <= 0 {
            anyhow::bail!("GRANT_TTL_MINUTES must be positive");
        }
        if self.max_upload_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_BYTES must be positive");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}
