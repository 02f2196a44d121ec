//! Search filtering over a built tree.

use super::{NodeKind, TreeNode};

/// Prune `nodes` to the branches matching `term`.
///
/// Matching is a case-insensitive substring test on labels, descriptions and
/// player names. A leaf survives only if it matches. A folder survives if it
/// matches or any descendant survives, and keeps only its surviving children.
/// An empty term returns the nodes unchanged.
pub fn filter_tree(nodes: &[TreeNode], term: &str) -> Vec<TreeNode> {
    if term.is_empty() {
        return nodes.to_vec();
    }

    let query = term.to_lowercase();
    nodes
        .iter()
        .filter_map(|node| filter_node(node, &query))
        .collect()
}

fn filter_node(node: &TreeNode, query: &str) -> Option<TreeNode> {
    let matches_self = node.matches(query);

    match &node.kind {
        NodeKind::Leaf { .. } => matches_self.then(|| node.clone()),
        NodeKind::Folder { children } => {
            let children: Vec<_> = children
                .iter()
                .filter_map(|child| filter_node(child, query))
                .collect();

            (matches_self || !children.is_empty()).then(|| TreeNode {
                id: node.id.clone(),
                label: node.label.clone(),
                kind: NodeKind::Folder { children },
            })
        }
    }
}
