use crate::domain::{
    AssetRecord, DomainResult, GroupAssetDomain, GroupAssetRelationshipData, GroupRecord,
    NodeMasterService,
};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory group hierarchy and asset membership.
///
/// A group filter keeps the named group, its descendants and their assets.
pub struct InMemoryGroupAssetStore {
    data: Arc<RwLock<GroupAssetRelationshipData>>,
}

impl InMemoryGroupAssetStore {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(GroupAssetRelationshipData::default())),
        }
    }

    pub async fn add_group(&self, group: GroupRecord) {
        self.data.write().await.groups.push(group);
    }

    pub async fn add_asset(&self, asset: AssetRecord) {
        self.data.write().await.assets.push(asset);
    }
}

impl Default for InMemoryGroupAssetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupAssetDomain for InMemoryGroupAssetStore {
    async fn get_group_asset_and_relationship_data(
        &self,
        _correlation_id: &str,
        group_filter: Option<String>,
    ) -> DomainResult<GroupAssetRelationshipData> {
        let data = self.data.read().await;
        let Some(root) = group_filter else {
            return Ok(data.clone());
        };

        let mut included: HashSet<String> = HashSet::from([root]);
        // walk down the hierarchy until no new child is found
        loop {
            let before = included.len();
            for group in &data.groups {
                if let Some(parent) = &group.parent_group_name {
                    if included.contains(parent) {
                        included.insert(group.group_name.clone());
                    }
                }
            }
            if included.len() == before {
                break;
            }
        }

        Ok(GroupAssetRelationshipData {
            groups: data
                .groups
                .iter()
                .filter(|g| included.contains(&g.group_name))
                .cloned()
                .collect(),
            assets: data
                .assets
                .iter()
                .filter(|a| included.contains(&a.group_name))
                .cloned()
                .collect(),
        })
    }
}

/// In-memory set of wells migrated to the new architecture
pub struct InMemoryNodeMaster {
    wells: Arc<RwLock<HashSet<String>>>,
}

impl InMemoryNodeMaster {
    pub fn new() -> Self {
        Self {
            wells: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub async fn add_well(&self, well_id: &str) {
        self.wells.write().await.insert(well_id.to_string());
    }
}

impl Default for InMemoryNodeMaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeMasterService for InMemoryNodeMaster {
    async fn get_new_architecture_wells(
        &self,
        _correlation_id: &str,
    ) -> DomainResult<HashSet<String>> {
        Ok(self.wells.read().await.clone())
    }
}
