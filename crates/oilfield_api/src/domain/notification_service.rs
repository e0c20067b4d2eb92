use crate::domain::skip;
use chrono::{DateTime, Utc};
use common::domain::{
    is_blank, require, DispatchResult, DomainResult, NotificationEvent, NotificationStore,
    NotificationTypeSummary, NotificationTypesInput, NotificationsInput, SkipReason,
    WithCorrelationId,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

const ASSET_SELECTOR: &str = "asset id or asset group name";

/// Which lookup path a request selects; asset id wins over group name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetSelector<'a> {
    AssetId(&'a str),
    AssetGroupName(&'a str),
}

impl<'a> AssetSelector<'a> {
    fn from_fields(asset_id: &'a str, asset_group_name: &'a str) -> Option<Self> {
        if !is_blank(asset_id) {
            Some(AssetSelector::AssetId(asset_id))
        } else if !is_blank(asset_group_name) {
            Some(AssetSelector::AssetGroupName(asset_group_name))
        } else {
            None
        }
    }
}

/// A notification event as returned to API callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationItem {
    pub event_id: i64,
    pub asset_id: String,
    pub asset_name: String,
    pub notification_type: String,
    pub date: DateTime<Utc>,
    pub note: String,
    pub user_id: Option<String>,
}

impl From<NotificationEvent> for NotificationItem {
    fn from(event: NotificationEvent) -> Self {
        Self {
            event_id: event.event_id,
            asset_id: event.asset_id,
            asset_name: event.asset_name,
            notification_type: event.notification_type_name,
            date: event.date,
            note: event.note,
            user_id: event.user_id,
        }
    }
}

/// Notification events, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationsOutput {
    pub values: Vec<NotificationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationTypeItem {
    pub id: i32,
    pub name: String,
    pub count: u32,
}

impl From<NotificationTypeSummary> for NotificationTypeItem {
    fn from(summary: NotificationTypeSummary) -> Self {
        Self {
            id: summary.notification_type_id,
            name: summary.notification_type_name,
            count: summary.event_count,
        }
    }
}

/// Notification types with event counts, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationTypesOutput {
    pub values: Vec<NotificationTypeItem>,
}

/// Service for notification lookups by asset or asset group
pub struct NotificationService {
    notification_store: Arc<dyn NotificationStore>,
}

#[derive(Default)]
pub struct NotificationServiceBuilder {
    notification_store: Option<Arc<dyn NotificationStore>>,
}

impl NotificationServiceBuilder {
    pub fn notification_store(mut self, store: Arc<dyn NotificationStore>) -> Self {
        self.notification_store = Some(store);
        self
    }

    pub fn build(self) -> DomainResult<NotificationService> {
        Ok(NotificationService {
            notification_store: require(self.notification_store, "notification_store")?,
        })
    }
}

impl NotificationService {
    pub fn builder() -> NotificationServiceBuilder {
        NotificationServiceBuilder::default()
    }

    /// Notification events for an asset, or for every asset in a group
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_notifications(
        &self,
        request: WithCorrelationId<NotificationsInput>,
    ) -> DomainResult<DispatchResult<NotificationsOutput>> {
        const OPERATION: &str = "get_notifications";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        let Some(selector) = AssetSelector::from_fields(&input.asset_id, &input.asset_group_name)
        else {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector(ASSET_SELECTOR),
            ));
        };

        let events = match selector {
            AssetSelector::AssetId(asset_id) => {
                debug!(correlation_id, asset_id, "loading notifications by asset id");
                self.notification_store
                    .get_events_by_asset_id(asset_id, input.notification_type_id, correlation_id)
                    .await?
            }
            AssetSelector::AssetGroupName(group) => {
                debug!(correlation_id, asset_group_name = group, "loading notifications by group");
                self.notification_store
                    .get_events_by_asset_group_name(
                        group,
                        input.notification_type_id,
                        correlation_id,
                    )
                    .await?
            }
        };

        let mut values: Vec<NotificationItem> = events.into_iter().map(Into::into).collect();
        values.sort_by(|a, b| b.date.cmp(&a.date));

        debug!(correlation_id, count = values.len(), "loaded notifications");
        Ok(DispatchResult::Success(NotificationsOutput { values }))
    }

    /// Notification types present for an asset or asset group
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_notification_types(
        &self,
        request: WithCorrelationId<NotificationTypesInput>,
    ) -> DomainResult<DispatchResult<NotificationTypesOutput>> {
        const OPERATION: &str = "get_notification_types";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        let Some(selector) = AssetSelector::from_fields(&input.asset_id, &input.asset_group_name)
        else {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector(ASSET_SELECTOR),
            ));
        };

        let summaries = match selector {
            AssetSelector::AssetId(asset_id) => {
                self.notification_store
                    .get_notification_types_by_asset_id(asset_id, correlation_id)
                    .await?
            }
            AssetSelector::AssetGroupName(group) => {
                self.notification_store
                    .get_notification_types_by_asset_group_name(group, correlation_id)
                    .await?
            }
        };

        let mut values: Vec<NotificationTypeItem> =
            summaries.into_iter().map(Into::into).collect();
        values.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(DispatchResult::Success(NotificationTypesOutput { values }))
    }
}
