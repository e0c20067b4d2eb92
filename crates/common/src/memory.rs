//! In-memory collaborators backed by `tokio::sync::RwLock`.

mod credential_store;
mod dashboard_store;
mod group_asset_store;
mod notification_store;
mod user_default_store;
mod well_test_store;

pub use credential_store::*;
pub use dashboard_store::*;
pub use group_asset_store::*;
pub use notification_store::*;
pub use user_default_store::*;
pub use well_test_store::*;
