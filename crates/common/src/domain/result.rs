use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Argument missing: {0}")]
    MissingArgument(&'static str),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Token error: {0}")]
    TokenError(String),

    #[error("Password hashing error: {0}")]
    PasswordHashingError(String),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] anyhow::Error),
}

/// Unwrap a builder slot, failing with the collaborator's name when unset
pub fn require<T>(value: Option<T>, name: &'static str) -> DomainResult<T> {
    value.ok_or(DomainError::MissingArgument(name))
}

/// True when a selector or key field carries no usable value
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_present() {
        let value = require(Some(5), "store");
        assert_eq!(value.unwrap(), 5);
    }

    #[test]
    fn test_require_missing_names_argument() {
        let result = require::<u8>(None, "notification_store");
        match result {
            Err(DomainError::MissingArgument(name)) => assert_eq!(name, "notification_store"),
            other => panic!("expected MissingArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" asset-1 "));
    }
}
