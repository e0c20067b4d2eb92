use crate::domain::skip;
use common::domain::{
    is_blank, require, DashboardStore, DispatchResult, DomainResult, GetWidgetPreferenceInput,
    SaveWidgetPreferenceInput, SkipReason, WidgetPreference, WidgetPreferenceRecord,
    WidgetPropertyType, WithCorrelationId,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const WIDGET_KEY: &str = "dashboard name and widget name";

/// Stored preference for one widget; `preference` is `None` when nothing is saved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetPreferenceOutput {
    pub dashboard_name: String,
    pub widget_name: String,
    pub preference: Option<WidgetPreference>,
}

/// Service for dashboard widget user preferences
pub struct DashboardWidgetService {
    dashboard_store: Arc<dyn DashboardStore>,
}

#[derive(Default)]
pub struct DashboardWidgetServiceBuilder {
    dashboard_store: Option<Arc<dyn DashboardStore>>,
}

impl DashboardWidgetServiceBuilder {
    pub fn dashboard_store(mut self, store: Arc<dyn DashboardStore>) -> Self {
        self.dashboard_store = Some(store);
        self
    }

    pub fn build(self) -> DomainResult<DashboardWidgetService> {
        Ok(DashboardWidgetService {
            dashboard_store: require(self.dashboard_store, "dashboard_store")?,
        })
    }
}

impl DashboardWidgetService {
    pub fn builder() -> DashboardWidgetServiceBuilder {
        DashboardWidgetServiceBuilder::default()
    }

    /// Validate a preference against its property type and persist it.
    ///
    /// A payload that does not match its declared property type is a
    /// `ValidationError` and never reaches the store.
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn save_widget_preferences(
        &self,
        request: WithCorrelationId<SaveWidgetPreferenceInput>,
        user_id: &str,
    ) -> DomainResult<DispatchResult<bool>> {
        const OPERATION: &str = "save_widget_preferences";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        if is_blank(user_id) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector("user id"),
            ));
        }

        if is_blank(&input.dashboard_name) || is_blank(&input.widget_name) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector(WIDGET_KEY),
            ));
        }

        let property_type: WidgetPropertyType = input.property_type.parse()?;
        let preference = WidgetPreference::parse(property_type, &input.preferences)?;

        let record = WidgetPreferenceRecord {
            dashboard_name: input.dashboard_name,
            widget_name: input.widget_name,
            property_type,
            preferences: preference.to_json()?,
        };

        debug!(
            correlation_id,
            dashboard_name = %record.dashboard_name,
            widget_name = %record.widget_name,
            %property_type,
            "saving widget preferences"
        );

        let saved = self
            .dashboard_store
            .save_dashboard_widget_user_preferences(record, user_id, correlation_id)
            .await?;

        if !saved {
            warn!(correlation_id, "dashboard store did not acknowledge widget preferences");
        }

        Ok(DispatchResult::Success(saved))
    }

    /// Fetch the stored preference for a user's widget
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_widget_preferences(
        &self,
        request: WithCorrelationId<GetWidgetPreferenceInput>,
    ) -> DomainResult<DispatchResult<WidgetPreferenceOutput>> {
        const OPERATION: &str = "get_widget_preferences";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        if is_blank(&input.user_id) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector("user id"),
            ));
        }

        if is_blank(&input.dashboard_name) || is_blank(&input.widget_name) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector(WIDGET_KEY),
            ));
        }

        let record = self
            .dashboard_store
            .get_dashboard_widget_data(
                &input.dashboard_name,
                &input.widget_name,
                &input.user_id,
                correlation_id,
            )
            .await?;

        let preference = match record {
            Some(record) => Some(WidgetPreference::parse(
                record.property_type,
                &record.preferences,
            )?),
            None => None,
        };

        Ok(DispatchResult::Success(WidgetPreferenceOutput {
            dashboard_name: input.dashboard_name,
            widget_name: input.widget_name,
            preference,
        }))
    }
}
