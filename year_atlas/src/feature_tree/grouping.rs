//! Grouping strategies for one level of the feature tree.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use year_rules::FeatureType;

use super::{FeatureRecord, UNKNOWN_PLAYER};

/// How records are bucketed into folders at one level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Grouping {
    /// A folder per feature type, in declared order.
    FeatureType { keep_empty: bool },
    /// A folder per player display name, sorted by name.
    Player,
}

/// One folder's worth of records.
pub(crate) struct Group<'a> {
    /// This folder's part of the folder ID.
    pub segment: String,
    pub label: String,
    pub records: Vec<&'a FeatureRecord>,
}

impl Grouping {
    fn prefix(self) -> &'static str {
        match self {
            Grouping::FeatureType { .. } => "type",
            Grouping::Player => "player",
        }
    }

    /// Folder ID for a group: top-level folders carry the strategy prefix,
    /// nested folders extend their parent's ID.
    pub fn folder_id(self, parent: Option<&str>, segment: &str) -> String {
        match parent {
            Some(parent) => format!("{parent}:{segment}"),
            None => format!("{}:{segment}", self.prefix()),
        }
    }

    /// Bucket `records` into ordered groups.
    pub fn groups<'a>(self, records: Vec<&'a FeatureRecord>) -> Vec<Group<'a>> {
        match self {
            Grouping::FeatureType { keep_empty } => FeatureType::ALL
                .into_iter()
                .filter_map(|feature_type| {
                    let members: Vec<_> = records
                        .iter()
                        .copied()
                        .filter(|record| record.feature_type == feature_type)
                        .collect();
                    (keep_empty || !members.is_empty()).then(|| Group {
                        segment: feature_type.id().to_string(),
                        label: feature_type.label().to_string(),
                        records: members,
                    })
                })
                .collect(),

            Grouping::Player => {
                let mut by_player: BTreeMap<&str, Vec<&'a FeatureRecord>> = BTreeMap::new();
                for record in records {
                    by_player.entry(player_label(record)).or_default().push(record);
                }

                let mut players: Vec<_> = by_player.into_iter().collect();
                players.sort_by(|a, b| collate(a.0, b.0));

                players
                    .into_iter()
                    .enumerate()
                    .map(|(index, (name, members))| Group {
                        segment: slugify(&format!("{name}-{index}")),
                        label: name.to_string(),
                        records: members,
                    })
                    .collect()
            }
        }
    }
}

fn player_label(record: &FeatureRecord) -> &str {
    if record.player_name.is_empty() {
        UNKNOWN_PLAYER
    } else {
        &record.player_name
    }
}

/// Order display strings the way a reader expects: ignoring case, then lower
/// case before upper case.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Lower-case ASCII slug; runs of anything else collapse to a single `-`.
pub(crate) fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for c in value.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}
