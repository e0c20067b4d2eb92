use crate::domain::{
    AdminService, DashboardWidgetService, GroupAndAssetService, NotificationService,
    UserLoginService, WellTestService,
};
use std::sync::Arc;
use tracing::debug;

/// The full set of application services handed to the hosting API layer
#[derive(Clone)]
pub struct OilfieldApiServices {
    pub admin: Arc<AdminService>,
    pub dashboard_widget: Arc<DashboardWidgetService>,
    pub group_and_asset: Arc<GroupAndAssetService>,
    pub notification: Arc<NotificationService>,
    pub user_login: Arc<UserLoginService>,
    pub well_test: Arc<WellTestService>,
}

impl OilfieldApiServices {
    pub fn new(
        admin: AdminService,
        dashboard_widget: DashboardWidgetService,
        group_and_asset: GroupAndAssetService,
        notification: NotificationService,
        user_login: UserLoginService,
        well_test: WellTestService,
    ) -> Self {
        debug!("Initializing oilfield API services");
        Self {
            admin: Arc::new(admin),
            dashboard_widget: Arc::new(dashboard_widget),
            group_and_asset: Arc::new(group_and_asset),
            notification: Arc::new(notification),
            user_login: Arc::new(user_login),
            well_test: Arc::new(well_test),
        }
    }
}
