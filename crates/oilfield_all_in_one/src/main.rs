mod config;

use common::auth::{
    Argon2PasswordService, JwtAuthTokenProvider, PasswordService, SystemTimeProvider,
};
use common::domain::CredentialRecord;
use common::memory::{
    InMemoryCredentialStore, InMemoryDashboardStore, InMemoryGroupAssetStore,
    InMemoryNodeMaster, InMemoryNotificationStore, InMemoryUserDefaultStore,
    InMemoryWellTestStore,
};
use common::telemetry::{init_telemetry, shutdown_telemetry, TelemetryProviders};
use config::ServiceConfig;
use oilfield_api::{
    AdminService, DashboardWidgetService, GroupAndAssetService, NotificationService,
    OilfieldApiServices, UserLoginService, WellTestService,
};
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let telemetry_providers: Option<TelemetryProviders> =
        match init_telemetry(&config.telemetry_config()) {
            Ok(providers) => providers,
            Err(e) => {
                eprintln!("Failed to initialize telemetry: {}", e);
                std::process::exit(1);
            }
        };

    info!(
        otel_enabled = config.otel_enabled,
        otel_endpoint = %config.otel_endpoint,
        new_architecture_enabled = config.new_architecture_enabled,
        "Starting oilfield-all-in-one service"
    );

    let services = match build_services(&config).await {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to initialize services: {:#}", e);
            shutdown_telemetry(telemetry_providers);
            std::process::exit(1);
        }
    };

    info!("Oilfield API services ready");

    wait_for_shutdown().await;

    info!("Running cleanup tasks...");
    drop(services);
    shutdown_telemetry(telemetry_providers);
    info!("Cleanup complete");
}

async fn build_services(config: &ServiceConfig) -> anyhow::Result<OilfieldApiServices> {
    let password_service = Arc::new(Argon2PasswordService::new());
    let credentials = Arc::new(InMemoryCredentialStore::new());
    seed_bootstrap_admin(config, &credentials, password_service.as_ref()).await?;

    let token_provider = Arc::new(JwtAuthTokenProvider::new(
        config.token_config(),
        Arc::new(SystemTimeProvider),
    ));

    let admin = AdminService::builder()
        .auth_repository(credentials)
        .password_service(password_service)
        .token_provider(token_provider)
        .build()?;

    let dashboard_widget = DashboardWidgetService::builder()
        .dashboard_store(Arc::new(InMemoryDashboardStore::new()))
        .build()?;

    let group_and_asset = GroupAndAssetService::builder()
        .group_asset_domain(Arc::new(InMemoryGroupAssetStore::new()))
        .node_master(Arc::new(InMemoryNodeMaster::new()))
        .new_architecture(config.new_architecture_enabled)
        .build()?;

    let notification = NotificationService::builder()
        .notification_store(Arc::new(InMemoryNotificationStore::new()))
        .build()?;

    let user_login = UserLoginService::builder()
        .user_default_store(Arc::new(InMemoryUserDefaultStore::new()))
        .build()?;

    let well_test = WellTestService::builder()
        .well_test_store(Arc::new(InMemoryWellTestStore::new()))
        .build()?;

    Ok(OilfieldApiServices::new(
        admin,
        dashboard_widget,
        group_and_asset,
        notification,
        user_login,
        well_test,
    ))
}

async fn seed_bootstrap_admin(
    config: &ServiceConfig,
    credentials: &InMemoryCredentialStore,
    password_service: &dyn PasswordService,
) -> anyhow::Result<()> {
    let password_hash = password_service.hash_password(&config.bootstrap_admin_password)?;
    credentials
        .upsert(CredentialRecord {
            user_id: config.bootstrap_admin_username.clone(),
            username: config.bootstrap_admin_username.clone(),
            password_hash,
        })
        .await;
    debug!(username = %config.bootstrap_admin_username, "Seeded bootstrap admin credential");
    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => log_ctrl_c(result),
                    _ = sigterm.recv() => info!("Received SIGTERM signal"),
                }
                return;
            }
            Err(err) => error!("Error setting up SIGTERM handler: {}", err),
        }
    }

    log_ctrl_c(tokio::signal::ctrl_c().await);
}

fn log_ctrl_c(result: std::io::Result<()>) {
    match result {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => error!("Error setting up signal handler: {}", err),
    }
}
