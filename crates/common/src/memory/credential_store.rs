use crate::domain::{AuthRepository, CredentialRecord, DomainResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory credentials keyed by user name
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Add or replace a credential
    pub async fn upsert(&self, record: CredentialRecord) {
        let mut credentials = self.credentials.write().await;
        credentials.insert(record.username.clone(), record);
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthRepository for InMemoryCredentialStore {
    async fn find_by_name(
        &self,
        username: &str,
        _password: &str,
        _correlation_id: &str,
    ) -> DomainResult<Option<CredentialRecord>> {
        let credentials = self.credentials.read().await;
        Ok(credentials.get(username).cloned())
    }
}
