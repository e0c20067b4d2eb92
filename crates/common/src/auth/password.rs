use crate::auth::PasswordService;
use crate::domain::{DomainError, DomainResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Argon2 password hashing in PHC string format.
///
/// Verification is deterministic for a given stored hash: the salt and
/// parameters are read back from the PHC string.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DomainError::PasswordHashingError(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        // accounts provisioned without a password never match
        if hash.is_empty() {
            return Ok(false);
        }

        let stored = PasswordHash::new(hash)
            .map_err(|e| DomainError::PasswordHashingError(e.to_string()))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &stored)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_string() {
        let service = Argon2PasswordService::new();
        let hash = service.hash_password("test").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_salts_differ() {
        let service = Argon2PasswordService::new();
        let first = service.hash_password("test").unwrap();
        let second = service.hash_password("test").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_matching_password() {
        let service = Argon2PasswordService::new();
        let hash = service.hash_password("test").unwrap();
        assert!(service.verify_password("test", &hash).unwrap());
        // repeated checks give the same answer
        assert!(service.verify_password("test", &hash).unwrap());
    }

    #[test]
    fn test_verify_wrong_password() {
        let service = Argon2PasswordService::new();
        let hash = service.hash_password("test").unwrap();
        assert!(!service.verify_password("not-test", &hash).unwrap());
    }

    #[test]
    fn test_verify_empty_hash() {
        let service = Argon2PasswordService::new();
        assert!(!service.verify_password("test", "").unwrap());
    }

    #[test]
    fn test_verify_malformed_hash() {
        let service = Argon2PasswordService::new();
        let result = service.verify_password("test", "plain-text");
        assert!(matches!(result, Err(DomainError::PasswordHashingError(_))));
    }
}
