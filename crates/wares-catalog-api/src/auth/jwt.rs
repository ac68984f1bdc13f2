//! HS256 bearer token issuance and validation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use wares_core::AppError;

use crate::auth::models::Claims;

/// Issue a bearer token for the given username.
pub fn issue_token(
    secret: &str,
    username: &str,
    expiry_hours: i64,
) -> Result<(String, DateTime<Utc>), AppError> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(expiry_hours);

    let claims = Claims {
        sub: username.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))?;

    Ok((token, expires_at))
}

/// Validate a bearer token and return its claims. Expired or malformed
/// tokens are a generic unauthorized error.
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-jwt-secret";

    #[test]
    fn test_issue_and_decode_round_trip() {
        let (token, expires_at) = issue_token(SECRET, "seller", 1).unwrap();
        assert!(expires_at > Utc::now());

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, "seller");
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = issue_token(SECRET, "seller", 1).unwrap();
        assert!(decode_token("another-jwt-secret", &token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token(SECRET, "not.a.token").is_err());
    }
}
