use crate::domain::DomainResult;
use serde::{Deserialize, Serialize};

/// Claims carried by an API token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,  // user_id
    pub name: String, // username
    pub iat: i64,
    pub exp: i64,
}

/// Issue, validate and refresh signed API tokens
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait AuthTokenProvider: Send + Sync {
    /// Sign a token for a user
    fn generate_token(&self, user_id: &str, username: &str) -> DomainResult<String>;

    /// Verify signature and expiry, returning the claims
    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims>;

    /// Re-issue a still valid token with a fresh validity window
    fn refresh_token(&self, token: &str) -> DomainResult<String>;
}

/// Trait for password hashing and verification
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password
    fn hash_password(&self, password: &str) -> DomainResult<String>;

    /// Verify a password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool>;
}
