//! Feature Tree - a folder hierarchy over the feature store.
//!
//! Building a tree is a pure function of the feature records and a view mode:
//! 1. **Records**: Each feature becomes a [`FeatureRecord`] with a display title
//! 2. **Grouping**: Records are bucketed level by level (by type, or by player then type)
//! 3. **Leaves**: Each bucket's records are sorted by title and emitted as leaves
//! 4. **Filtering**: A search term prunes the tree down to matching branches

mod builder;
mod filter;
mod grouping;

pub use builder::*;
pub use filter::*;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use year_rules::{BuiltFeature, FeatureType};

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "No description provided yet.";

/// Folder label for features whose player has no name.
pub const UNKNOWN_PLAYER: &str = "Unknown Adventurer";

/// How features are grouped into folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// One folder per feature type.
    #[default]
    ByType,
    /// One folder per player, with a subfolder per feature type they used.
    ByPlayer,
}

/// A feature as the tree sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub player_name: String,
    pub feature_type: FeatureType,
}

impl FeatureRecord {
    /// Describe a stored feature. The title falls back to the description.
    pub fn from_feature(id: &str, feature: &BuiltFeature) -> Self {
        let description = if feature.description.is_empty() {
            NO_DESCRIPTION.to_string()
        } else {
            feature.description.clone()
        };

        Self {
            id: id.to_string(),
            title: description.clone(),
            description,
            player_name: feature.player_name.clone(),
            feature_type: feature.feature_type,
        }
    }

    /// Use a display name from the map as the title, unless it is blank.
    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        if !name.is_empty() {
            self.title = name.to_string();
        }
        self
    }
}

/// Turn the feature store into records, looking up display names by feature ID.
pub fn feature_records<F>(
    features: &BTreeMap<String, BuiltFeature>,
    display_name: F,
) -> Vec<FeatureRecord>
where
    F: Fn(&str) -> Option<String>,
{
    features
        .iter()
        .map(|(id, feature)| {
            let record = FeatureRecord::from_feature(id, feature);
            match display_name(id) {
                Some(name) => record.with_name(&name),
                None => record,
            }
        })
        .collect()
}

/// A node in the feature tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Stable across rebuilds of the same view.
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Folder or leaf payload of a [`TreeNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    #[serde(rename = "folder")]
    Folder { children: Vec<TreeNode> },
    #[serde(rename = "feature", rename_all = "camelCase")]
    Leaf {
        feature_id: String,
        description: String,
        player_name: String,
    },
}

impl TreeNode {
    /// Create a folder node.
    pub fn folder(id: impl Into<String>, label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: NodeKind::Folder { children },
        }
    }

    /// Create the leaf for a feature record.
    pub fn leaf(record: &FeatureRecord) -> Self {
        Self {
            id: format!("feature:{}", record.id),
            label: record.title.clone(),
            kind: NodeKind::Leaf {
                feature_id: record.id.clone(),
                description: record.description.clone(),
                player_name: record.player_name.clone(),
            },
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Child nodes; always empty for leaves.
    pub fn children(&self) -> &[TreeNode] {
        match &self.kind {
            NodeKind::Folder { children } => children.as_slice(),
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// The feature a leaf points at.
    pub fn feature_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { feature_id, .. } => Some(feature_id.as_str()),
            NodeKind::Folder { .. } => None,
        }
    }

    /// Number of leaves at or below this node.
    pub fn leaf_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Folder { children } => children.iter().map(TreeNode::leaf_count).sum(),
        }
    }

    /// Find a node by ID at or below this node.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Whether the label, description or player name contains `query`.
    ///
    /// `query` must already be lower case.
    fn matches(&self, query: &str) -> bool {
        if self.label.to_lowercase().contains(query) {
            return true;
        }
        match &self.kind {
            NodeKind::Leaf {
                description,
                player_name,
                ..
            } => {
                description.to_lowercase().contains(query)
                    || player_name.to_lowercase().contains(query)
            }
            NodeKind::Folder { .. } => false,
        }
    }
}

/// A built tree together with its folder bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStructure {
    pub nodes: Vec<TreeNode>,
    /// Every folder ID, parents before their children.
    pub folder_ids: Vec<String>,
    /// Folders holding at least one leaf. Empty folders start collapsed.
    pub default_expanded: BTreeSet<String>,
}

impl TreeStructure {
    /// Find a node by ID anywhere in the tree.
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.nodes.iter().find_map(|node| node.find(id))
    }

    /// Feature IDs of every leaf, in tree order.
    pub fn feature_ids(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node.feature_id() {
                    Some(id) => out.push(id),
                    None => collect(node.children(), out),
                }
            }
        }

        let mut ids = Vec::new();
        collect(&self.nodes, &mut ids);
        ids
    }
}

#[cfg(test)]
pub(crate) fn record(
    id: &str,
    title: &str,
    player: &str,
    feature_type: FeatureType,
) -> FeatureRecord {
    FeatureRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("About {title}"),
        player_name: player.to_string(),
        feature_type,
    }
}
