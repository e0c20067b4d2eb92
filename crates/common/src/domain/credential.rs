use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Stored credential for an API user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user_id: String,
    pub username: String,
    pub password_hash: String,
}

/// Login request payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Lookup of stored credentials by user name
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Find the credential record for a user name, if one exists
    async fn find_by_name(
        &self,
        username: &str,
        password: &str,
        correlation_id: &str,
    ) -> DomainResult<Option<CredentialRecord>>;
}
