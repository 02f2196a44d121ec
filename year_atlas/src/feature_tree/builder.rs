//! Tree construction for both view modes.

use super::grouping::{collate, Grouping};
use super::{FeatureRecord, TreeNode, TreeStructure, ViewMode};

const BY_TYPE: &[Grouping] = &[Grouping::FeatureType { keep_empty: true }];

const BY_PLAYER: &[Grouping] = &[
    Grouping::Player,
    Grouping::FeatureType { keep_empty: false },
];

impl ViewMode {
    /// Grouping applied at each folder level, outermost first.
    pub(crate) fn levels(self) -> &'static [Grouping] {
        match self {
            ViewMode::ByType => BY_TYPE,
            ViewMode::ByPlayer => BY_PLAYER,
        }
    }
}

/// Build the folder hierarchy for `records` in the given view mode.
///
/// Deterministic: the same records and mode always give the same tree.
pub fn build_tree(records: &[FeatureRecord], mode: ViewMode) -> TreeStructure {
    let mut tree = TreeStructure::default();
    let nodes = build_level(records.iter().collect(), mode.levels(), None, &mut tree);
    tree.nodes = nodes;

    tracing::debug!(
        ?mode,
        features = records.len(),
        folders = tree.folder_ids.len(),
        "Feature tree built"
    );
    tree
}

fn build_level(
    records: Vec<&FeatureRecord>,
    levels: &[Grouping],
    parent: Option<&str>,
    tree: &mut TreeStructure,
) -> Vec<TreeNode> {
    let Some((grouping, rest)) = levels.split_first() else {
        return leaves(records);
    };

    let mut nodes = Vec::new();
    for group in grouping.groups(records) {
        let id = grouping.folder_id(parent, &group.segment);
        tree.folder_ids.push(id.clone());

        let children = build_level(group.records, rest, Some(&id), tree);
        let folder = TreeNode::folder(id, group.label, children);
        if folder.leaf_count() > 0 {
            tree.default_expanded.insert(folder.id.clone());
        }
        nodes.push(folder);
    }
    nodes
}

fn leaves(mut records: Vec<&FeatureRecord>) -> Vec<TreeNode> {
    records.sort_by(|a, b| collate(&a.title, &b.title).then_with(|| a.id.cmp(&b.id)));
    records.into_iter().map(TreeNode::leaf).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_tree::record;
    use std::collections::BTreeSet;
    use year_rules::FeatureType;

    fn sample() -> Vec<FeatureRecord> {
        vec![
            record("m1", "wyrm", "Bob", FeatureType::Monsters),
            record("n1", "Zara", "Alice", FeatureType::Npcs),
            record("n2", "abbot", "Bob", FeatureType::Npcs),
            record("l1", "Harbor", "Alice", FeatureType::Locations),
            record("u1", "Strange stone", "", FeatureType::Unassigned),
        ]
    }

    fn labels(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.label.as_str()).collect()
    }

    #[test]
    fn test_by_type_has_six_folders() {
        let tree = build_tree(&sample(), ViewMode::ByType);

        assert_eq!(
            labels(&tree.nodes),
            ["NPCs", "Monsters", "Magic Items", "Deities", "Locations", "Unassigned"]
        );
        assert_eq!(
            tree.folder_ids,
            [
                "type:npcs",
                "type:monsters",
                "type:magic-items",
                "type:deities",
                "type:locations",
                "type:unassigned"
            ]
        );
        assert_eq!(labels(tree.nodes[0].children()), ["abbot", "Zara"]);
    }

    #[test]
    fn test_by_type_on_empty_store() {
        let tree = build_tree(&[], ViewMode::ByType);
        assert_eq!(tree.nodes.len(), 6);
        assert!(tree.nodes.iter().all(|n| n.children().is_empty()));
        assert!(tree.default_expanded.is_empty());
    }

    #[test]
    fn test_by_type_places_every_feature_once() {
        let records = sample();
        let tree = build_tree(&records, ViewMode::ByType);

        let mut ids = tree.feature_ids();
        ids.sort_unstable();
        let mut expected: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_default_expanded_skips_empty_folders() {
        let tree = build_tree(&sample(), ViewMode::ByType);
        let expected: BTreeSet<String> = [
            "type:npcs",
            "type:monsters",
            "type:locations",
            "type:unassigned",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(tree.default_expanded, expected);
    }

    #[test]
    fn test_by_player_nests_used_types() {
        let tree = build_tree(&sample(), ViewMode::ByPlayer);

        assert_eq!(labels(&tree.nodes), ["Alice", "Bob", "Unknown Adventurer"]);

        let alice = &tree.nodes[0];
        assert_eq!(alice.id, "player:alice-0");
        assert_eq!(labels(alice.children()), ["NPCs", "Locations"]);
        assert_eq!(alice.children()[0].id, "player:alice-0:npcs");

        let bob = &tree.nodes[1];
        assert_eq!(labels(bob.children()), ["NPCs", "Monsters"]);
        assert_eq!(labels(bob.children()[0].children()), ["abbot"]);

        assert_eq!(
            tree.folder_ids,
            [
                "player:alice-0",
                "player:alice-0:npcs",
                "player:alice-0:locations",
                "player:bob-1",
                "player:bob-1:npcs",
                "player:bob-1:monsters",
                "player:unknown-adventurer-2",
                "player:unknown-adventurer-2:unassigned"
            ]
        );
        // Every folder here holds a leaf.
        assert_eq!(tree.default_expanded.len(), tree.folder_ids.len());
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut records = sample();
        let first = build_tree(&records, ViewMode::ByPlayer);

        records.reverse();
        let second = build_tree(&records, ViewMode::ByPlayer);

        assert_eq!(first, second);
    }

    #[test]
    fn test_equal_titles_fall_back_to_id() {
        let records = vec![
            record("b", "Well", "Alice", FeatureType::Locations),
            record("a", "Well", "Alice", FeatureType::Locations),
        ];
        let tree = build_tree(&records, ViewMode::ByType);
        assert_eq!(tree.feature_ids(), ["a", "b"]);
    }
}
