use chrono::{Duration, TimeZone, Utc};
use common::auth::{
    Argon2PasswordService, AuthTokenProvider, FixedTimeProvider, JwtAuthTokenProvider,
    PasswordService, TokenConfig,
};
use common::domain::{
    AssetRecord, CredentialRecord, EspWellTestRecord, GetWidgetPreferenceInput,
    GroupAndAssetInput, GroupRecord, LoginInput, NotificationEvent, NotificationTypesInput,
    NotificationsInput, SaveWidgetPreferenceInput, SkipReason, TimePeriodPreference,
    WellTestInput, WidgetPreference, WithCorrelationId,
};
use common::memory::{
    InMemoryCredentialStore, InMemoryDashboardStore, InMemoryGroupAssetStore,
    InMemoryNodeMaster, InMemoryNotificationStore, InMemoryUserDefaultStore,
    InMemoryWellTestStore,
};
use oilfield_api::{
    AdminService, DashboardWidgetService, GroupAndAssetService, NotificationService,
    OilfieldApiServices, UserLoginService, WellTestService,
};
use serde_json::json;
use std::sync::Arc;

struct Fixture {
    services: OilfieldApiServices,
    credentials: Arc<InMemoryCredentialStore>,
    notifications: Arc<InMemoryNotificationStore>,
    groups: Arc<InMemoryGroupAssetStore>,
    node_master: Arc<InMemoryNodeMaster>,
    well_tests: Arc<InMemoryWellTestStore>,
    token_provider: Arc<JwtAuthTokenProvider>,
}

fn fixture(new_architecture: bool) -> Fixture {
    let credentials = Arc::new(InMemoryCredentialStore::new());
    let notifications = Arc::new(InMemoryNotificationStore::new());
    let groups = Arc::new(InMemoryGroupAssetStore::new());
    let node_master = Arc::new(InMemoryNodeMaster::new());
    let well_tests = Arc::new(InMemoryWellTestStore::new());
    let clock = Arc::new(FixedTimeProvider::new(
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
    ));
    let token_provider = Arc::new(JwtAuthTokenProvider::new(
        TokenConfig::new("integration-secret".to_string(), 60),
        clock,
    ));

    let services = OilfieldApiServices::new(
        AdminService::builder()
            .auth_repository(credentials.clone())
            .password_service(Arc::new(Argon2PasswordService::new()))
            .token_provider(token_provider.clone())
            .build()
            .unwrap(),
        DashboardWidgetService::builder()
            .dashboard_store(Arc::new(InMemoryDashboardStore::new()))
            .build()
            .unwrap(),
        GroupAndAssetService::builder()
            .group_asset_domain(groups.clone())
            .node_master(node_master.clone())
            .new_architecture(new_architecture)
            .build()
            .unwrap(),
        NotificationService::builder()
            .notification_store(notifications.clone())
            .build()
            .unwrap(),
        UserLoginService::builder()
            .user_default_store(Arc::new(InMemoryUserDefaultStore::new()))
            .build()
            .unwrap(),
        WellTestService::builder()
            .well_test_store(well_tests.clone())
            .build()
            .unwrap(),
    );

    Fixture {
        services,
        credentials,
        notifications,
        groups,
        node_master,
        well_tests,
        token_provider,
    }
}

fn event(event_id: i64, asset_id: &str, type_id: i32, type_name: &str, days_ago: i64) -> NotificationEvent {
    NotificationEvent {
        event_id,
        asset_id: asset_id.to_string(),
        asset_name: format!("Well {}", asset_id),
        notification_type_id: type_id,
        notification_type_name: type_name.to_string(),
        date: Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap() - Duration::days(days_ago),
        note: String::new(),
        user_id: None,
    }
}

#[tokio::test]
async fn test_first_login_is_idempotent_until_recorded() {
    let fixture = fixture(false);
    let login = &fixture.services.user_login;

    for _ in 0..3 {
        assert!(login.is_first_time_login("operator", "corr-1").await.unwrap());
    }

    assert!(login.set_user_logged_in("operator", "corr-1").await.unwrap());

    for _ in 0..3 {
        assert!(!login.is_first_time_login("operator", "corr-1").await.unwrap());
    }
}

#[tokio::test]
async fn test_login_then_issue_and_refresh_token() {
    let fixture = fixture(false);
    let hash = Argon2PasswordService::new().hash_password("test").unwrap();
    fixture
        .credentials
        .upsert(CredentialRecord {
            user_id: "user-7".to_string(),
            username: "test".to_string(),
            password_hash: hash,
        })
        .await;

    let admin = &fixture.services.admin;
    let record = admin
        .find_by_name(WithCorrelationId::new(
            "corr-2",
            LoginInput {
                username: "test".to_string(),
                password: "test".to_string(),
            },
        ))
        .await
        .unwrap()
        .expect("credentials should match");

    let token = admin.issue_token(&record).unwrap();
    let claims = fixture.token_provider.validate_token(&token).unwrap();
    assert_eq!(claims.sub, "user-7");

    let refreshed = admin.refresh_token(&token).unwrap();
    assert_eq!(fixture.token_provider.validate_token(&refreshed).unwrap().name, "test");

    let wrong_user = admin
        .find_by_name(WithCorrelationId::new(
            "corr-2",
            LoginInput {
                username: "tests".to_string(),
                password: "test".to_string(),
            },
        ))
        .await
        .unwrap();
    assert!(wrong_user.is_none());

    let wrong_password = admin
        .find_by_name(WithCorrelationId::new(
            "corr-2",
            LoginInput {
                username: "test".to_string(),
                password: "nope".to_string(),
            },
        ))
        .await
        .unwrap();
    assert!(wrong_password.is_none());
}

#[tokio::test]
async fn test_widget_preferences_save_then_fetch() {
    let fixture = fixture(false);
    let dashboard = &fixture.services.dashboard_widget;

    let saved = dashboard
        .save_widget_preferences(
            WithCorrelationId::new(
                "corr-3",
                SaveWidgetPreferenceInput {
                    dashboard_name: "wellgroup".to_string(),
                    widget_name: "welltest".to_string(),
                    property_type: "TimePeriod".to_string(),
                    preferences: json!({"days": 30}),
                },
            ),
            "user-1",
        )
        .await
        .unwrap();
    assert!(saved.into_value());

    let fetch = |user_id: &str| GetWidgetPreferenceInput {
        dashboard_name: "wellgroup".to_string(),
        widget_name: "welltest".to_string(),
        user_id: user_id.to_string(),
    };

    let own = dashboard
        .get_widget_preferences(WithCorrelationId::new("corr-3", fetch("user-1")))
        .await
        .unwrap()
        .into_value();
    assert_eq!(
        own.preference,
        Some(WidgetPreference::TimePeriod(TimePeriodPreference { days: 30 }))
    );

    let other = dashboard
        .get_widget_preferences(WithCorrelationId::new("corr-3", fetch("user-2")))
        .await
        .unwrap()
        .into_value();
    assert_eq!(other.preference, None);
}

#[tokio::test]
async fn test_notifications_by_asset_and_group() {
    let fixture = fixture(false);
    fixture.notifications.assign_group("a-1", "North").await;
    fixture.notifications.assign_group("a-2", "North").await;
    fixture.notifications.assign_group("a-3", "South").await;
    fixture.notifications.add_event(event(1, "a-1", 10, "Alarm", 3)).await;
    fixture.notifications.add_event(event(2, "a-1", 20, "Comment", 1)).await;
    fixture.notifications.add_event(event(3, "a-2", 10, "Alarm", 2)).await;
    fixture.notifications.add_event(event(4, "a-3", 10, "Alarm", 0)).await;

    let notification = &fixture.services.notification;

    let by_asset = notification
        .get_notifications(WithCorrelationId::new(
            "corr-4",
            NotificationsInput {
                asset_id: "a-1".to_string(),
                ..Default::default()
            },
        ))
        .await
        .unwrap()
        .into_value();
    let ids: Vec<i64> = by_asset.values.iter().map(|v| v.event_id).collect();
    assert_eq!(ids, vec![2, 1]);

    let by_group = notification
        .get_notifications(WithCorrelationId::new(
            "corr-4",
            NotificationsInput {
                asset_group_name: "North".to_string(),
                notification_type_id: Some(10),
                ..Default::default()
            },
        ))
        .await
        .unwrap()
        .into_value();
    let ids: Vec<i64> = by_group.values.iter().map(|v| v.event_id).collect();
    assert_eq!(ids, vec![3, 1]);

    let types = notification
        .get_notification_types(WithCorrelationId::new(
            "corr-4",
            NotificationTypesInput {
                asset_group_name: "North".to_string(),
                ..Default::default()
            },
        ))
        .await
        .unwrap()
        .into_value();
    let summary: Vec<(String, u32)> = types.values.into_iter().map(|t| (t.name, t.count)).collect();
    assert_eq!(
        summary,
        vec![("Alarm".to_string(), 2), ("Comment".to_string(), 1)]
    );

    let neither = notification
        .get_notifications(WithCorrelationId::new("corr-4", NotificationsInput::default()))
        .await
        .unwrap();
    assert_eq!(
        neither.skip_reason(),
        Some(SkipReason::MissingSelector("asset id or asset group name"))
    );
}

#[tokio::test]
async fn test_group_tree_with_new_architecture_filter() {
    let fixture = fixture(true);
    for (name, parent) in [("Field", None), ("North", Some("Field")), ("South", Some("Field"))] {
        fixture
            .groups
            .add_group(GroupRecord {
                group_name: name.to_string(),
                parent_group_name: parent.map(str::to_string),
            })
            .await;
    }
    for (id, group, well) in [("a-1", "North", "w-1"), ("a-2", "North", "w-2"), ("a-3", "South", "w-3")] {
        fixture
            .groups
            .add_asset(AssetRecord {
                asset_id: id.to_string(),
                asset_name: format!("Well {}", id),
                group_name: group.to_string(),
                well_id: well.to_string(),
                industry_application_id: Some(3),
            })
            .await;
    }
    fixture.node_master.add_well("w-2").await;

    let output = fixture
        .services
        .group_and_asset
        .get_group_and_assets(WithCorrelationId::new(
            "corr-5",
            GroupAndAssetInput {
                user_id: "user-1".to_string(),
                group_filter: Some("Field".to_string()),
            },
        ))
        .await
        .unwrap()
        .into_value();

    assert_eq!(output.groups.len(), 1);
    let field = &output.groups[0];
    assert_eq!(field.name, "Field");
    assert_eq!(field.asset_count(), 1);
    assert_eq!(field.groups[0].assets[0].asset_id, "a-2");
    assert!(field.groups[1].assets.is_empty());
}

#[tokio::test]
async fn test_esp_well_tests_empty_and_populated() {
    let fixture = fixture(false);
    let well_test = &fixture.services.well_test;
    let input = || WellTestInput {
        asset_id: "a-1".to_string(),
    };

    let empty = well_test
        .get_esp_well_tests(WithCorrelationId::new("corr-6", input()))
        .await
        .unwrap();
    assert!(empty.is_success());
    assert!(empty.into_value().values.is_empty());

    fixture
        .well_tests
        .add_esp_test(
            "a-1",
            EspWellTestRecord {
                test_date: Utc::now(),
                approved: true,
                oil_rate: Some(250.0),
                water_rate: Some(80.0),
                gas_rate: Some(1.2),
            },
        )
        .await;

    let populated = well_test
        .get_esp_well_tests(WithCorrelationId::new("corr-6", input()))
        .await
        .unwrap()
        .into_value();
    assert_eq!(populated.values.len(), 1);
    assert!(populated.values[0].approved);
}
