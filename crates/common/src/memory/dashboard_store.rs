use crate::domain::{DashboardStore, DomainResult, WidgetPreferenceRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

type WidgetKey = (String, String, String);

/// In-memory widget preferences keyed by (dashboard, widget, user)
pub struct InMemoryDashboardStore {
    preferences: Arc<RwLock<HashMap<WidgetKey, WidgetPreferenceRecord>>>,
}

impl InMemoryDashboardStore {
    pub fn new() -> Self {
        Self {
            preferences: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.preferences.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.preferences.read().await.is_empty()
    }
}

impl Default for InMemoryDashboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DashboardStore for InMemoryDashboardStore {
    async fn save_dashboard_widget_user_preferences(
        &self,
        record: WidgetPreferenceRecord,
        user_id: &str,
        _correlation_id: &str,
    ) -> DomainResult<bool> {
        let key = (
            record.dashboard_name.clone(),
            record.widget_name.clone(),
            user_id.to_string(),
        );
        let mut preferences = self.preferences.write().await;
        preferences.insert(key, record);
        Ok(true)
    }

    async fn get_dashboard_widget_data(
        &self,
        dashboard_name: &str,
        widget_name: &str,
        user_id: &str,
        _correlation_id: &str,
    ) -> DomainResult<Option<WidgetPreferenceRecord>> {
        let key = (
            dashboard_name.to_string(),
            widget_name.to_string(),
            user_id.to_string(),
        );
        let preferences = self.preferences.read().await;
        Ok(preferences.get(&key).cloned())
    }
}
