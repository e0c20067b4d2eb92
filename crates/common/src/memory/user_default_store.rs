use crate::domain::{DomainResult, UserDefaultStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type UserDefaultKey = (String, String, String);

/// In-memory user defaults keyed by (user, property, group)
pub struct InMemoryUserDefaultStore {
    items: Arc<RwLock<HashMap<UserDefaultKey, String>>>,
}

impl InMemoryUserDefaultStore {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserDefaultStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDefaultStore for InMemoryUserDefaultStore {
    async fn get_item(
        &self,
        user_id: &str,
        property: &str,
        group: &str,
        correlation_id: &str,
    ) -> DomainResult<Option<String>> {
        debug!(correlation_id, user_id, property, group, "reading user default");
        let items = self.items.read().await;
        Ok(items
            .get(&(user_id.to_string(), property.to_string(), group.to_string()))
            .cloned())
    }

    async fn set_item(
        &self,
        user_id: &str,
        property: &str,
        group: &str,
        value: &str,
        correlation_id: &str,
    ) -> DomainResult<bool> {
        debug!(correlation_id, user_id, property, group, "writing user default");
        let mut items = self.items.write().await;
        items.insert(
            (user_id.to_string(), property.to_string(), group.to_string()),
            value.to_string(),
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_item() {
        let store = InMemoryUserDefaultStore::new();
        let value = store.get_item("user", "HasLoggedIn", "Login", "c1").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryUserDefaultStore::new();
        assert!(store
            .set_item("user", "HasLoggedIn", "Login", "1", "c1")
            .await
            .unwrap());

        let value = store.get_item("user", "HasLoggedIn", "Login", "c2").await.unwrap();
        assert_eq!(value.as_deref(), Some("1"));

        // other groups are separate keys
        let other = store.get_item("user", "HasLoggedIn", "Other", "c3").await.unwrap();
        assert_eq!(other, None);
    }
}
