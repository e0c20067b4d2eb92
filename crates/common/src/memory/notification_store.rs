use crate::domain::{DomainResult, NotificationEvent, NotificationStore, NotificationTypeSummary};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory notification events with an asset to group membership map
pub struct InMemoryNotificationStore {
    events: Arc<RwLock<Vec<NotificationEvent>>>,
    asset_groups: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            asset_groups: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn add_event(&self, event: NotificationEvent) {
        self.events.write().await.push(event);
    }

    pub async fn assign_group(&self, asset_id: &str, asset_group_name: &str) {
        self.asset_groups
            .write()
            .await
            .insert(asset_id.to_string(), asset_group_name.to_string());
    }

    async fn events_where<F>(&self, keep: F) -> Vec<NotificationEvent>
    where
        F: Fn(&NotificationEvent) -> bool,
    {
        let events = self.events.read().await;
        events.iter().filter(|e| keep(e)).cloned().collect()
    }

    async fn group_asset_ids(&self, asset_group_name: &str) -> Vec<String> {
        let asset_groups = self.asset_groups.read().await;
        asset_groups
            .iter()
            .filter(|(_, group)| group.as_str() == asset_group_name)
            .map(|(asset_id, _)| asset_id.clone())
            .collect()
    }
}

impl Default for InMemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(events: &[NotificationEvent]) -> Vec<NotificationTypeSummary> {
    let mut counts: BTreeMap<i32, NotificationTypeSummary> = BTreeMap::new();
    for event in events {
        counts
            .entry(event.notification_type_id)
            .or_insert_with(|| NotificationTypeSummary {
                notification_type_id: event.notification_type_id,
                notification_type_name: event.notification_type_name.clone(),
                event_count: 0,
            })
            .event_count += 1;
    }
    counts.into_values().collect()
}

fn type_matches(event: &NotificationEvent, notification_type_id: Option<i32>) -> bool {
    notification_type_id.map_or(true, |id| event.notification_type_id == id)
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn get_events_by_asset_id(
        &self,
        asset_id: &str,
        notification_type_id: Option<i32>,
        _correlation_id: &str,
    ) -> DomainResult<Vec<NotificationEvent>> {
        Ok(self
            .events_where(|e| e.asset_id == asset_id && type_matches(e, notification_type_id))
            .await)
    }

    async fn get_events_by_asset_group_name(
        &self,
        asset_group_name: &str,
        notification_type_id: Option<i32>,
        _correlation_id: &str,
    ) -> DomainResult<Vec<NotificationEvent>> {
        let asset_ids = self.group_asset_ids(asset_group_name).await;
        Ok(self
            .events_where(|e| asset_ids.contains(&e.asset_id) && type_matches(e, notification_type_id))
            .await)
    }

    async fn get_notification_types_by_asset_id(
        &self,
        asset_id: &str,
        _correlation_id: &str,
    ) -> DomainResult<Vec<NotificationTypeSummary>> {
        let events = self.events_where(|e| e.asset_id == asset_id).await;
        Ok(summarize(&events))
    }

    async fn get_notification_types_by_asset_group_name(
        &self,
        asset_group_name: &str,
        _correlation_id: &str,
    ) -> DomainResult<Vec<NotificationTypeSummary>> {
        let asset_ids = self.group_asset_ids(asset_group_name).await;
        let events = self.events_where(|e| asset_ids.contains(&e.asset_id)).await;
        Ok(summarize(&events))
    }
}
