use crate::domain::result::DomainResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Asset group; `parent_group_name` is `None` for top-level groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub group_name: String,
    pub parent_group_name: Option<String>,
}

/// Asset and the group it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub asset_id: String,
    pub asset_name: String,
    pub group_name: String,
    pub well_id: String,
    pub industry_application_id: Option<i32>,
}

/// Flat group and asset relationship data as returned by the domain service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssetRelationshipData {
    pub groups: Vec<GroupRecord>,
    pub assets: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAndAssetInput {
    pub user_id: String,
    pub group_filter: Option<String>,
}

/// Group/asset domain service
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait GroupAssetDomain: Send + Sync {
    async fn get_group_asset_and_relationship_data(
        &self,
        correlation_id: &str,
        group_filter: Option<String>,
    ) -> DomainResult<GroupAssetRelationshipData>;
}

/// Node master lookups
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait NodeMasterService: Send + Sync {
    /// Well ids already running on the new architecture
    async fn get_new_architecture_wells(&self, correlation_id: &str)
        -> DomainResult<HashSet<String>>;
}
