use crate::domain::result::{is_blank, DomainError, DomainResult};
use crate::validation::validate_struct;
use async_trait::async_trait;
use garde::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of preference a dashboard widget stores; fixes the JSON shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetPropertyType {
    TimePeriod,
    Columns,
    WellFilter,
}

impl WidgetPropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetPropertyType::TimePeriod => "timeperiod",
            WidgetPropertyType::Columns => "columns",
            WidgetPropertyType::WellFilter => "wellfilter",
        }
    }
}

impl fmt::Display for WidgetPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetPropertyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timeperiod" => Ok(WidgetPropertyType::TimePeriod),
            "columns" => Ok(WidgetPropertyType::Columns),
            "wellfilter" => Ok(WidgetPropertyType::WellFilter),
            other => Err(DomainError::ValidationError(format!(
                "Unknown widget property type: {}",
                other
            ))),
        }
    }
}

fn not_blank(value: &str, _context: &()) -> garde::Result {
    if is_blank(value) {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

/// Look-back window in days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TimePeriodPreference {
    #[garde(range(min = 1, max = 365))]
    pub days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColumnPreference {
    #[garde(custom(not_blank))]
    pub key: String,
    #[garde(skip)]
    pub visible: bool,
    #[garde(skip)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ColumnsPreference {
    #[garde(length(min = 1), dive)]
    pub columns: Vec<ColumnPreference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct WellFilterPreference {
    #[garde(custom(not_blank))]
    pub asset_group_name: String,
    #[garde(skip)]
    pub include_shut_in: bool,
}

/// Typed widget preference, one variant per property type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WidgetPreference {
    TimePeriod(TimePeriodPreference),
    Columns(ColumnsPreference),
    WellFilter(WellFilterPreference),
}

impl WidgetPreference {
    /// Check `value` against the shape `property_type` declares
    pub fn parse(
        property_type: WidgetPropertyType,
        value: &serde_json::Value,
    ) -> DomainResult<Self> {
        match property_type {
            WidgetPropertyType::TimePeriod => {
                let preference: TimePeriodPreference = from_json(property_type, value)?;
                validate_struct(&preference)?;
                Ok(WidgetPreference::TimePeriod(preference))
            }
            WidgetPropertyType::Columns => {
                let preference: ColumnsPreference = from_json(property_type, value)?;
                validate_struct(&preference)?;
                Ok(WidgetPreference::Columns(preference))
            }
            WidgetPropertyType::WellFilter => {
                let preference: WellFilterPreference = from_json(property_type, value)?;
                validate_struct(&preference)?;
                Ok(WidgetPreference::WellFilter(preference))
            }
        }
    }

    pub fn property_type(&self) -> WidgetPropertyType {
        match self {
            WidgetPreference::TimePeriod(_) => WidgetPropertyType::TimePeriod,
            WidgetPreference::Columns(_) => WidgetPropertyType::Columns,
            WidgetPreference::WellFilter(_) => WidgetPropertyType::WellFilter,
        }
    }

    pub fn to_json(&self) -> DomainResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| {
            DomainError::ValidationError(format!("Cannot serialize widget preference: {}", e))
        })
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    property_type: WidgetPropertyType,
    value: &serde_json::Value,
) -> DomainResult<T> {
    serde_json::from_value(value.clone()).map_err(|e| {
        DomainError::ValidationError(format!(
            "Preferences do not match property type {}: {}",
            property_type, e
        ))
    })
}

/// Stored widget preference as persisted by the dashboard store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPreferenceRecord {
    pub dashboard_name: String,
    pub widget_name: String,
    pub property_type: WidgetPropertyType,
    pub preferences: serde_json::Value,
}

/// Save request; `property_type` is the raw name supplied by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct SaveWidgetPreferenceInput {
    pub dashboard_name: String,
    pub widget_name: String,
    pub property_type: String,
    pub preferences: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetWidgetPreferenceInput {
    pub dashboard_name: String,
    pub widget_name: String,
    pub user_id: String,
}

/// Dashboard widget preference storage
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Persist a validated preference; returns the store's acknowledgment
    async fn save_dashboard_widget_user_preferences(
        &self,
        record: WidgetPreferenceRecord,
        user_id: &str,
        correlation_id: &str,
    ) -> DomainResult<bool>;

    async fn get_dashboard_widget_data(
        &self,
        dashboard_name: &str,
        widget_name: &str,
        user_id: &str,
        correlation_id: &str,
    ) -> DomainResult<Option<WidgetPreferenceRecord>>;
}
