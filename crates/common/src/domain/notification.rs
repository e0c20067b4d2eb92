use crate::domain::result::DomainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification event raised for an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event_id: i64,
    pub asset_id: String,
    pub asset_name: String,
    pub notification_type_id: i32,
    pub notification_type_name: String,
    pub date: DateTime<Utc>,
    pub note: String,
    pub user_id: Option<String>,
}

/// Count of events of one notification type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationTypeSummary {
    pub notification_type_id: i32,
    pub notification_type_name: String,
    pub event_count: u32,
}

/// Query for notification events; asset id takes precedence over group name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationsInput {
    pub asset_id: String,
    pub asset_group_name: String,
    pub notification_type_id: Option<i32>,
}

/// Query for notification types; asset id takes precedence over group name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTypesInput {
    pub asset_id: String,
    pub asset_group_name: String,
}

/// Notification storage lookups
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn get_events_by_asset_id(
        &self,
        asset_id: &str,
        notification_type_id: Option<i32>,
        correlation_id: &str,
    ) -> DomainResult<Vec<NotificationEvent>>;

    async fn get_events_by_asset_group_name(
        &self,
        asset_group_name: &str,
        notification_type_id: Option<i32>,
        correlation_id: &str,
    ) -> DomainResult<Vec<NotificationEvent>>;

    async fn get_notification_types_by_asset_id(
        &self,
        asset_id: &str,
        correlation_id: &str,
    ) -> DomainResult<Vec<NotificationTypeSummary>>;

    async fn get_notification_types_by_asset_group_name(
        &self,
        asset_group_name: &str,
        correlation_id: &str,
    ) -> DomainResult<Vec<NotificationTypeSummary>>;
}
