//! Detail panel contents for a selected feature.

use serde::Serialize;
use year_rules::{BuiltFeature, LoreEntry};

use crate::feature_tree::FeatureRecord;

pub const NO_DESCRIPTION_YET: &str = "No description yet.";
pub const NO_LORE_YET: &str = "No lore recorded yet.";

/// What the detail panel shows for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDetail<'a> {
    pub id: String,
    pub title: String,
    pub type_label: &'static str,
    pub description: String,
    pub lore: String,
    /// Author and provenance, e.g. `Alice · Spring, Turn 3`.
    pub subhead: String,
    /// Newest first.
    pub history: Vec<&'a LoreEntry>,
}

impl<'a> FeatureDetail<'a> {
    /// Build the panel for `feature`. Without a title the tree's default applies.
    pub fn new(id: &str, feature: &'a BuiltFeature, title: Option<String>) -> Self {
        let title = title.unwrap_or_else(|| FeatureRecord::from_feature(id, feature).title);

        Self {
            id: id.to_string(),
            title,
            type_label: feature.feature_type.label(),
            description: or_placeholder(&feature.description, NO_DESCRIPTION_YET),
            lore: or_placeholder(&feature.lore, NO_LORE_YET),
            subhead: format!("{} · {}", feature.player_name, feature.provenance_label()),
            history: feature.lore_history_newest_first(),
        }
    }

    /// One line per history entry: `{author} · {Season}, Turn {n}: {text}`.
    pub fn history_lines(&self) -> Vec<String> {
        self.history
            .iter()
            .map(|entry| {
                format!(
                    "{} · {}, Turn {}: {}",
                    entry.player_name, entry.season, entry.turn, entry.text
                )
            })
            .collect()
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use year_rules::{FeatureDetails, FeatureType, Player, Season};

    fn lore(text: &str, turn: u32, timestamp: i64) -> LoreEntry {
        LoreEntry {
            player_id: "2".to_string(),
            player_name: "Bob".to_string(),
            season: Season::Summer,
            turn,
            text: text.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_detail_for_bare_feature() {
        let feature = BuiltFeature::created(
            FeatureDetails::by(&Player::new("1", "Alice")),
            Season::Spring,
            3,
        );
        let detail = FeatureDetail::new("f1", &feature, None);

        assert_eq!(detail.title, "No description provided yet.");
        assert_eq!(detail.type_label, "Unassigned");
        assert_eq!(detail.description, NO_DESCRIPTION_YET);
        assert_eq!(detail.lore, NO_LORE_YET);
        assert_eq!(detail.subhead, "Alice · Spring, Turn 3");
        assert!(detail.history.is_empty());
    }

    #[test]
    fn test_detail_history_is_newest_first() {
        let mut feature = BuiltFeature::created(
            FeatureDetails::by(&Player::new("1", "Alice"))
                .with_description("Sunken bell")
                .with_lore("Rings at low tide")
                .with_type(FeatureType::MagicItems),
            Season::Spring,
            1,
        );
        feature.lore_history.push(lore("Heard at dawn", 5, 1_000));
        feature.lore_history.push(lore("Pulled from the mud", 6, 2_000));

        let detail = FeatureDetail::new("f1", &feature, Some("The Bell".to_string()));
        assert_eq!(detail.title, "The Bell");
        assert_eq!(detail.type_label, "Magic Items");
        assert_eq!(detail.description, "Sunken bell");
        assert_eq!(
            detail.history_lines(),
            [
                "Bob · Summer, Turn 6: Pulled from the mud",
                "Bob · Summer, Turn 5: Heard at dawn"
            ]
        );
    }
}
