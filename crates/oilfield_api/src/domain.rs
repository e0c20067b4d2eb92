mod admin_service;
mod dashboard_widget_service;
mod group_and_asset_service;
mod notification_service;
mod user_login_service;
mod well_test_service;

pub use admin_service::*;
pub use dashboard_widget_service::*;
pub use group_and_asset_service::*;
pub use notification_service::*;
pub use user_login_service::*;
pub use well_test_service::*;

use common::domain::{DispatchResult, SkipReason};
use tracing::info;

/// Log a skipped dispatch at info level and build the negative result
pub(crate) fn skip<T>(
    operation: &'static str,
    correlation_id: &str,
    reason: SkipReason,
) -> DispatchResult<T> {
    info!(correlation_id, operation, %reason, "{} cannot proceed: {}", operation, reason);
    DispatchResult::Skipped(reason)
}
