use crate::domain::result::DomainResult;
use async_trait::async_trait;

/// Per-user key/value defaults, addressed by property and group
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserDefaultStore: Send + Sync {
    async fn get_item(
        &self,
        user_id: &str,
        property: &str,
        group: &str,
        correlation_id: &str,
    ) -> DomainResult<Option<String>>;

    /// Write a value; returns the store's acknowledgment
    async fn set_item(
        &self,
        user_id: &str,
        property: &str,
        group: &str,
        value: &str,
        correlation_id: &str,
    ) -> DomainResult<bool>;
}
