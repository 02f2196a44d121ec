//! Feature definitions - the narrative entities players place on the map.

use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Reverse;

use super::Player;
use crate::mechanics::Season;

/// The category a feature is filed under.
///
/// Written by id; read leniently, so unknown or miscased values load as
/// [`FeatureType::Unassigned`] or their matching type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureType {
    Npcs,
    Monsters,
    MagicItems,
    Deities,
    Locations,
    #[default]
    Unassigned,
}

impl FeatureType {
    /// All feature types in their declared display order.
    pub const ALL: [FeatureType; 6] = [
        FeatureType::Npcs,
        FeatureType::Monsters,
        FeatureType::MagicItems,
        FeatureType::Deities,
        FeatureType::Locations,
        FeatureType::Unassigned,
    ];

    /// Stable identifier, as written in snapshots.
    pub fn id(self) -> &'static str {
        match self {
            FeatureType::Npcs => "npcs",
            FeatureType::Monsters => "monsters",
            FeatureType::MagicItems => "magic-items",
            FeatureType::Deities => "deities",
            FeatureType::Locations => "locations",
            FeatureType::Unassigned => "unassigned",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FeatureType::Npcs => "NPCs",
            FeatureType::Monsters => "Monsters",
            FeatureType::MagicItems => "Magic Items",
            FeatureType::Deities => "Deities",
            FeatureType::Locations => "Locations",
            FeatureType::Unassigned => "Unassigned",
        }
    }

    /// Map free-form input onto a feature type, ignoring case.
    ///
    /// Anything unrecognised is filed as [`FeatureType::Unassigned`].
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|ty| ty.id() == normalized)
            .unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for FeatureType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .map(Self::parse_lenient)
            .unwrap_or_default())
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The editable part of a feature, as submitted by a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDetails {
    pub player_id: String,
    pub player_name: String,
    pub description: String,
    pub lore: String,
    pub feature_type: FeatureType,
}

impl FeatureDetails {
    /// Start a blank submission attributed to `player`.
    pub fn by(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            description: String::new(),
            lore: String::new(),
            feature_type: FeatureType::Unassigned,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the current lore.
    pub fn with_lore(mut self, lore: impl Into<String>) -> Self {
        self.lore = lore.into();
        self
    }

    /// Set the feature type.
    pub fn with_type(mut self, feature_type: FeatureType) -> Self {
        self.feature_type = feature_type;
        self
    }
}

/// A timestamped lore note appended to a feature's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoreEntry {
    pub player_id: String,
    pub player_name: String,
    pub season: Season,
    pub turn: u32,
    pub text: String,
    /// Wall-clock milliseconds since the Unix epoch at insertion.
    pub timestamp: i64,
}

/// A feature recorded in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltFeature {
    pub player_id: String,
    pub player_name: String,
    pub description: String,
    pub lore: String,
    pub feature_type: FeatureType,

    /// Season the feature was created in. Never changes afterwards.
    pub season: Season,
    /// Global turn the feature was created on. Never changes afterwards.
    pub turn: u32,

    /// Append-only, in insertion order.
    pub lore_history: Vec<LoreEntry>,
}

impl BuiltFeature {
    /// Create a feature from submitted details, stamped with its provenance.
    pub fn created(details: FeatureDetails, season: Season, turn: u32) -> Self {
        Self {
            player_id: details.player_id,
            player_name: details.player_name,
            description: details.description,
            lore: details.lore,
            feature_type: details.feature_type,
            season,
            turn,
            lore_history: Vec::new(),
        }
    }

    /// Overwrite the editable fields, leaving provenance and history alone.
    pub fn apply(&mut self, details: FeatureDetails) {
        self.player_id = details.player_id;
        self.player_name = details.player_name;
        self.description = details.description;
        self.lore = details.lore;
        self.feature_type = details.feature_type;
    }

    /// Lore history for display: newest first, later insertions first on ties.
    pub fn lore_history_newest_first(&self) -> Vec<&LoreEntry> {
        let mut entries: Vec<_> = self.lore_history.iter().rev().collect();
        entries.sort_by_key(|entry| Reverse(entry.timestamp));
        entries
    }

    /// Provenance for detail panels, e.g. `Spring, Turn 3`.
    pub fn provenance_label(&self) -> String {
        format!("{}, Turn {}", self.season, self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, timestamp: i64) -> LoreEntry {
        LoreEntry {
            player_id: "1".to_string(),
            player_name: "Alice".to_string(),
            season: Season::Spring,
            turn: 1,
            text: text.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_feature_type_wire_ids() {
        let json = serde_json::to_string(&FeatureType::MagicItems).unwrap();
        assert_eq!(json, "\"magic-items\"");

        let ty: FeatureType = serde_json::from_str("\"npcs\"").unwrap();
        assert_eq!(ty, FeatureType::Npcs);

        let ty: FeatureType = serde_json::from_str("\"Locations\"").unwrap();
        assert_eq!(ty, FeatureType::Locations);
        let ty: FeatureType = serde_json::from_str("\"dragons\"").unwrap();
        assert_eq!(ty, FeatureType::Unassigned);
        let ty: FeatureType = serde_json::from_str("null").unwrap();
        assert_eq!(ty, FeatureType::Unassigned);

        for ty in FeatureType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.id()));
        }
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(FeatureType::parse_lenient("Deities"), FeatureType::Deities);
        assert_eq!(FeatureType::parse_lenient(" MAGIC-ITEMS "), FeatureType::MagicItems);
        assert_eq!(FeatureType::parse_lenient("dragons"), FeatureType::Unassigned);
        assert_eq!(FeatureType::parse_lenient(""), FeatureType::Unassigned);
    }

    #[test]
    fn test_apply_keeps_provenance_and_history() {
        let alice = Player::new("1", "Alice");
        let bob = Player::new("2", "Bob");

        let mut feature = BuiltFeature::created(
            FeatureDetails::by(&alice).with_description("A tower"),
            Season::Summer,
            4,
        );
        feature.lore_history.push(entry("Built by giants", 10));

        feature.apply(
            FeatureDetails::by(&bob)
                .with_description("A ruined tower")
                .with_lore("Haunted")
                .with_type(FeatureType::Locations),
        );

        assert_eq!(feature.player_name, "Bob");
        assert_eq!(feature.description, "A ruined tower");
        assert_eq!(feature.lore, "Haunted");
        assert_eq!(feature.feature_type, FeatureType::Locations);
        assert_eq!(feature.season, Season::Summer);
        assert_eq!(feature.turn, 4);
        assert_eq!(feature.lore_history.len(), 1);
    }

    #[test]
    fn test_lore_history_newest_first() {
        let mut feature = BuiltFeature::created(
            FeatureDetails::by(&Player::new("1", "Alice")),
            Season::Spring,
            1,
        );
        feature.lore_history.push(entry("first", 100));
        feature.lore_history.push(entry("second", 300));
        feature.lore_history.push(entry("third", 300));
        feature.lore_history.push(entry("fourth", 200));

        let texts: Vec<_> = feature
            .lore_history_newest_first()
            .into_iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, ["third", "second", "fourth", "first"]);

        // Storage order is untouched.
        assert_eq!(feature.lore_history[0].text, "first");
    }

    #[test]
    fn test_built_feature_uses_camel_case_keys() {
        let feature = BuiltFeature::created(
            FeatureDetails::by(&Player::new("1", "Alice")),
            Season::Spring,
            1,
        );
        let value = serde_json::to_value(&feature).unwrap();
        assert!(value.get("playerName").is_some());
        assert!(value.get("featureType").is_some());
        assert!(value.get("loreHistory").is_some());
        assert_eq!(feature.provenance_label(), "Spring, Turn 1");
    }
}
