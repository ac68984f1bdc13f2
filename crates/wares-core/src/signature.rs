//! Keyed signature over upload grant requests.
//!
//! Canonical payload: `{file_name}|{content_type}|{file_size}|{product_id}`,
//! tag = base64(HMAC-SHA256(secret, payload)). Both services construct the
//! engine from the same pre-shared secret; the catalog side signs, the
//! storage side verifies.
//!
//! The `|` delimiter is not escaped, so a field containing `|` can collide
//! with a different tuple. Kept for wire compatibility; see DESIGN.md.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::models::{PresignedUrlRequest, UploadUrlRequest};

type HmacSha256 = Hmac<Sha256>;

fn b64() -> base64::engine::GeneralPurpose {
    base64::engine::general_purpose::STANDARD
}

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("signing secret must not be empty")]
    EmptySecret,
}

/// The declared attributes of an upload, in canonical signing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantClaims<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub file_size: u64,
    pub product_id: &'a str,
}

impl<'a> GrantClaims<'a> {
    fn canonical_payload(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.file_name, self.content_type, self.file_size, self.product_id
        )
    }
}

impl<'a> From<&'a UploadUrlRequest> for GrantClaims<'a> {
    fn from(request: &'a UploadUrlRequest) -> Self {
        GrantClaims {
            file_name: &request.file_name,
            content_type: &request.content_type,
            file_size: request.file_size,
            product_id: &request.product_id,
        }
    }
}

impl<'a> From<&'a PresignedUrlRequest> for GrantClaims<'a> {
    fn from(request: &'a PresignedUrlRequest) -> Self {
        GrantClaims {
            file_name: &request.file_name,
            content_type: &request.content_type,
            file_size: request.file_size,
            product_id: &request.product_id,
        }
    }
}

/// Signs and verifies grant requests under a pre-shared secret.
///
/// Construction fails on an empty secret so a missing secret can never be
/// mistaken for a passing check.
#[derive(Clone)]
pub struct SignatureEngine {
    secret: Vec<u8>,
}

impl SignatureEngine {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, SignatureError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(SignatureError::EmptySecret);
        }
        Ok(Self { secret })
    }

    /// Compute the base64 tag for the given claims.
    pub fn sign(&self, claims: &GrantClaims<'_>) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key size");
        mac.update(claims.canonical_payload().as_bytes());
        b64().encode(mac.finalize().into_bytes())
    }

    /// Recompute the tag and compare in constant time. An undecodable or
    /// wrong-length tag is a mismatch, never an error.
    pub fn verify(&self, claims: &GrantClaims<'_>, tag: &str) -> bool {
        let presented = match b64().decode(tag) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };

        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key size");
        mac.update(claims.canonical_payload().as_bytes());
        let expected = mac.finalize().into_bytes();

        if presented.len() != expected.len() {
            return false;
        }
        presented.as_slice().ct_eq(expected.as_slice()).into()
    }
}

impl std::fmt::Debug for SignatureEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the secret
        f.debug_struct("SignatureEngine").finish_non_exhaustive()
    }
}
