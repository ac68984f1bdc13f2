//! Credential verification for the login endpoint.
//!
//! The catalog ships with a single configured account; the trait keeps the
//! check pluggable for a real user store.

use subtle::ConstantTimeEq;

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// The single configured account.
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both comparisons; no early exit on username mismatch
        let user_ok = secure_compare(username, &self.username);
        let pass_ok = secure_compare(password, &self.password);
        user_ok && pass_ok
    }
}
