//! The feature store: features keyed by the id the map assigns them.

use chrono::Utc;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::{GameState, TurnInfo};
use crate::entities::{BuiltFeature, FeatureDetails, LoreEntry};

impl GameState {
    /// Create or edit a feature.
    ///
    /// Editing overwrites the player, description, lore and type. The creation
    /// season and turn are stamped once and kept, as is the lore history.
    pub(crate) fn upsert_feature(&mut self, id: &str, details: FeatureDetails) {
        let TurnInfo { turn, season, .. } = self.current_turn_info();

        match self.built_features.entry(id.to_string()) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().apply(details);
                tracing::debug!(feature = id, "Feature updated");
            }
            Entry::Vacant(slot) => {
                slot.insert(BuiltFeature::created(details, season, turn));
                tracing::debug!(feature = id, turn, %season, "Feature created");
            }
        }
    }

    /// Append a lore note by the active player, stamped with the current time.
    pub(crate) fn add_to_lore_history(&mut self, id: &str, text: impl Into<String>) {
        self.record_lore(id, text, Utc::now().timestamp_millis());
    }

    /// Append a lore note by the active player with an explicit timestamp.
    ///
    /// A feature that does not exist yet is created on the spot, attributed to
    /// the active player and left unassigned.
    pub(crate) fn record_lore(&mut self, id: &str, text: impl Into<String>, timestamp: i64) {
        let player = self.current_player().clone();
        let TurnInfo { turn, season, .. } = self.current_turn_info();

        let feature = self
            .built_features
            .entry(id.to_string())
            .or_insert_with(|| BuiltFeature::created(FeatureDetails::by(&player), season, turn));

        feature.lore_history.push(LoreEntry {
            player_id: player.id,
            player_name: player.name,
            season,
            turn,
            text: text.into(),
            timestamp,
        });

        tracing::debug!(
            feature = id,
            entries = feature.lore_history.len(),
            "Lore entry recorded"
        );
    }

    /// Get a feature by ID.
    pub fn feature(&self, id: &str) -> Option<&BuiltFeature> {
        self.built_features.get(id)
    }

    /// All features, keyed by ID.
    pub fn features(&self) -> &BTreeMap<String, BuiltFeature> {
        &self.built_features
    }

    /// A point-in-time copy of every feature.
    pub fn features_snapshot(&self) -> BTreeMap<String, BuiltFeature> {
        self.built_features.clone()
    }

    pub fn feature_count(&self) -> usize {
        self.built_features.len()
    }
}
