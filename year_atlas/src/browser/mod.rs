//! Feature Browser - the non-visual state behind the feature sidebar.
//!
//! The browser keeps the current view mode, search term, selection and the
//! set of folders the user has expanded, and rebuilds the feature tree only
//! when its inputs change.

mod detail;

pub use detail::*;

use std::collections::BTreeSet;
use year_rules::GameState;

use crate::feature_tree::{
    build_tree, feature_records, filter_tree, FeatureRecord, TreeNode, TreeStructure, ViewMode,
};

/// Sidebar state for browsing features.
#[derive(Debug, Clone, Default)]
pub struct FeatureBrowser {
    view_mode: ViewMode,
    search_term: String,
    expanded: BTreeSet<String>,
    selected: Option<String>,

    records: Vec<FeatureRecord>,
    tree: TreeStructure,
    /// View mode the current tree was built for; `None` before the first build.
    built_for: Option<ViewMode>,
}

impl FeatureBrowser {
    /// Create a browser in the by-type view with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the features of a session, with display names from the map.
    ///
    /// Returns whether the tree was rebuilt.
    pub fn refresh_from<F>(&mut self, state: &GameState, display_name: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        self.refresh(feature_records(state.features(), display_name))
    }

    /// Load a new set of records.
    ///
    /// Returns whether the tree was rebuilt; identical records in the same view
    /// reuse the previous tree.
    pub fn refresh(&mut self, records: Vec<FeatureRecord>) -> bool {
        if self.built_for == Some(self.view_mode) && records == self.records {
            return false;
        }
        self.records = records;
        self.rebuild();

        if let Some(selected) = &self.selected {
            if !self.records.iter().any(|record| &record.id == selected) {
                self.selected = None;
            }
        }
        true
    }

    fn rebuild(&mut self) {
        let tree = build_tree(&self.records, self.view_mode);

        // A new view, or a change in which folders hold features, resets
        // expansion to the defaults.
        if self.built_for != Some(self.view_mode)
            || tree.default_expanded != self.tree.default_expanded
        {
            self.expanded = tree.default_expanded.clone();
        }

        self.tree = tree;
        self.built_for = Some(self.view_mode);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch the grouping, rebuilding the tree if it changed.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode != mode {
            self.view_mode = mode;
            self.rebuild();
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Whether a search is narrowing the tree.
    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// The unfiltered tree for the current view.
    pub fn tree(&self) -> &TreeStructure {
        &self.tree
    }

    /// Whether there are no features at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Nodes to render: the tree filtered by the current search term.
    pub fn visible_nodes(&self) -> Vec<TreeNode> {
        filter_tree(&self.tree.nodes, &self.search_term)
    }

    /// Expand or collapse a folder. Folders without children cannot toggle.
    ///
    /// Returns the folder's new state, or `None` if it cannot toggle.
    pub fn toggle_folder(&mut self, id: &str) -> Option<bool> {
        let folder = self.tree.find(id).filter(|node| node.is_folder())?;
        if folder.children().is_empty() {
            return None;
        }

        if self.expanded.remove(id) {
            Some(false)
        } else {
            self.expanded.insert(id.to_string());
            Some(true)
        }
    }

    /// Whether a folder is shown open.
    ///
    /// While searching every folder with children is open, so that matches are
    /// visible; otherwise the user's choices apply.
    pub fn is_expanded(&self, id: &str) -> bool {
        let has_children = self
            .tree
            .find(id)
            .is_some_and(|node| node.is_folder() && !node.children().is_empty());
        if !has_children {
            return false;
        }
        self.is_searching() || self.expanded.contains(id)
    }

    /// Select a feature for the detail panel.
    pub fn select(&mut self, feature_id: impl Into<String>) {
        self.selected = Some(feature_id.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Detail panel for the selected feature, if it exists in `state`.
    pub fn detail<'a>(&self, state: &'a GameState) -> Option<FeatureDetail<'a>> {
        let id = self.selected.as_deref()?;
        let feature = state.feature(id)?;
        let title = self
            .records
            .iter()
            .find(|record| record.id == id)
            .map(|record| record.title.clone());
        Some(FeatureDetail::new(id, feature, title))
    }
}
