use crate::domain::skip;
use common::domain::{
    is_blank, require, AssetRecord, DispatchResult, DomainResult, GroupAndAssetInput,
    GroupAssetDomain, GroupAssetRelationshipData, NodeMasterService, SkipReason,
    WithCorrelationId,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetNode {
    pub asset_id: String,
    pub asset_name: String,
    pub well_id: String,
    pub industry_application_id: Option<i32>,
}

impl From<AssetRecord> for AssetNode {
    fn from(record: AssetRecord) -> Self {
        Self {
            asset_id: record.asset_id,
            asset_name: record.asset_name,
            well_id: record.well_id,
            industry_application_id: record.industry_application_id,
        }
    }
}

/// A group with its child groups and assets, both sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNode {
    pub name: String,
    pub groups: Vec<GroupNode>,
    pub assets: Vec<AssetNode>,
}

impl GroupNode {
    /// Assets in this group and every descendant
    pub fn asset_count(&self) -> usize {
        self.assets.len() + self.groups.iter().map(GroupNode::asset_count).sum::<usize>()
    }
}

/// Group tree for a user; roots are groups without a known parent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupAndAssetOutput {
    pub groups: Vec<GroupNode>,
}

/// Build the group tree from flat relationship rows.
///
/// Assets whose group is unknown are dropped. Groups whose parent is missing
/// become roots. Groups caught in a parent cycle are unreachable and dropped.
fn build_group_tree(data: GroupAssetRelationshipData) -> GroupAndAssetOutput {
    let names: BTreeSet<String> = data.groups.iter().map(|g| g.group_name.clone()).collect();

    let mut children: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut roots: BTreeSet<String> = BTreeSet::new();
    for group in &data.groups {
        match &group.parent_group_name {
            Some(parent) if names.contains(parent) && parent != &group.group_name => {
                children
                    .entry(parent.clone())
                    .or_default()
                    .insert(group.group_name.clone());
            }
            _ => {
                roots.insert(group.group_name.clone());
            }
        }
    }

    let mut assets: BTreeMap<String, Vec<AssetNode>> = BTreeMap::new();
    for asset in data.assets {
        if names.contains(&asset.group_name) {
            assets
                .entry(asset.group_name.clone())
                .or_default()
                .push(asset.into());
        }
    }
    for group_assets in assets.values_mut() {
        group_assets.sort_by(|a, b| a.asset_name.cmp(&b.asset_name));
    }

    let mut visited = HashSet::new();
    let groups = roots
        .into_iter()
        .filter_map(|root| build_node(&root, &children, &mut assets, &mut visited))
        .collect();

    GroupAndAssetOutput { groups }
}

fn build_node(
    name: &str,
    children: &BTreeMap<String, BTreeSet<String>>,
    assets: &mut BTreeMap<String, Vec<AssetNode>>,
    visited: &mut HashSet<String>,
) -> Option<GroupNode> {
    // a group row listed twice must not be expanded twice
    if !visited.insert(name.to_string()) {
        return None;
    }

    let groups = children
        .get(name)
        .map(|child_names| {
            child_names
                .iter()
                .filter_map(|child| build_node(child, children, assets, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(GroupNode {
        name: name.to_string(),
        groups,
        assets: assets.remove(name).unwrap_or_default(),
    })
}

/// Service aggregating a user's groups and assets into a tree
pub struct GroupAndAssetService {
    group_asset_domain: Arc<dyn GroupAssetDomain>,
    node_master: Arc<dyn NodeMasterService>,
    new_architecture: bool,
}

#[derive(Default)]
pub struct GroupAndAssetServiceBuilder {
    group_asset_domain: Option<Arc<dyn GroupAssetDomain>>,
    node_master: Option<Arc<dyn NodeMasterService>>,
    new_architecture: bool,
}

impl GroupAndAssetServiceBuilder {
    pub fn group_asset_domain(mut self, domain: Arc<dyn GroupAssetDomain>) -> Self {
        self.group_asset_domain = Some(domain);
        self
    }

    pub fn node_master(mut self, node_master: Arc<dyn NodeMasterService>) -> Self {
        self.node_master = Some(node_master);
        self
    }

    /// Only return assets whose wells run on the new architecture
    pub fn new_architecture(mut self, enabled: bool) -> Self {
        self.new_architecture = enabled;
        self
    }

    pub fn build(self) -> DomainResult<GroupAndAssetService> {
        Ok(GroupAndAssetService {
            group_asset_domain: require(self.group_asset_domain, "group_asset_domain")?,
            node_master: require(self.node_master, "node_master")?,
            new_architecture: self.new_architecture,
        })
    }
}

impl GroupAndAssetService {
    pub fn builder() -> GroupAndAssetServiceBuilder {
        GroupAndAssetServiceBuilder::default()
    }

    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_group_and_assets(
        &self,
        request: WithCorrelationId<GroupAndAssetInput>,
    ) -> DomainResult<DispatchResult<GroupAndAssetOutput>> {
        const OPERATION: &str = "get_group_and_assets";
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

        debug!(correlation_id, user_id = %input.user_id, "loading group and asset data");
        let mut data = self
            .group_asset_domain
            .get_group_asset_and_relationship_data(correlation_id, input.group_filter)
            .await?;

        if self.new_architecture {
            let wells = self
                .node_master
                .get_new_architecture_wells(correlation_id)
                .await?;
            let before = data.assets.len();
            data.assets.retain(|asset| wells.contains(&asset.well_id));
            debug!(
                correlation_id,
                kept = data.assets.len(),
                dropped = before - data.assets.len(),
                "filtered assets to new architecture wells"
            );
        }

        let output = build_group_tree(data);
        if output.groups.is_empty() {
            warn!(correlation_id, user_id = %input.user_id, "no groups visible to user");
        }

        Ok(DispatchResult::Success(output))
    }
}
