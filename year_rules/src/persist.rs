//! Snapshot persistence for export/import.
//!
//! Snapshots are pretty-printed JSON documents holding every field of
//! [`GameState`] plus a `schemaVersion` tag. Documents written before the tag
//! existed are version 1. Older documents are upgraded by a chain of
//! migrations, each declaring defaults for the fields its version lacked.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game_state::{GameState, RulesError};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot must be a JSON object")]
    NotAnObject,

    #[error("Snapshot schema version is not a positive integer: {0}")]
    MalformedVersion(Value),

    #[error("Snapshot schema version {found} is newer than the supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },

    #[error("Invalid session state: {0}")]
    InvalidState(#[from] RulesError),
}

/// Current snapshot schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// File name offered for exported snapshots.
pub const DEFAULT_EXPORT_FILENAME: &str = "quiet-year-save.json";

const VERSION_KEY: &str = "schemaVersion";
const FEATURES_KEY: &str = "builtFeatures";

/// Computes a default for a missing field from the object that lacks it.
type FieldDefault = fn(&Map<String, Value>) -> Value;

/// Upgrade from one schema version to the next.
struct Migration {
    from: u32,
    state_defaults: &'static [(&'static str, FieldDefault)],
    feature_defaults: &'static [(&'static str, FieldDefault)],
}

/// Ordered by `from`, contiguous up to [`SCHEMA_VERSION`].
const MIGRATIONS: &[Migration] = &[Migration {
    from: 1,
    state_defaults: &[("year", first), ("globalTurnCount", first)],
    feature_defaults: &[
        ("playerName", player_name_from_id),
        ("loreHistory", empty_list),
        ("featureType", unassigned),
    ],
}];

fn first(_: &Map<String, Value>) -> Value {
    Value::from(1)
}

fn empty_list(_: &Map<String, Value>) -> Value {
    Value::Array(Vec::new())
}

fn unassigned(_: &Map<String, Value>) -> Value {
    Value::from("unassigned")
}

fn player_name_from_id(feature: &Map<String, Value>) -> Value {
    let id = match feature.get("playerId") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Value::from(format!("Player {id}"))
}

impl Migration {
    fn apply(&self, document: &mut Map<String, Value>) {
        fill_defaults(document, self.state_defaults);

        if let Some(Value::Object(features)) = document.get_mut(FEATURES_KEY) {
            for feature in features.values_mut() {
                if let Value::Object(feature) = feature {
                    fill_defaults(feature, self.feature_defaults);
                }
            }
        }
    }
}

fn fill_defaults(object: &mut Map<String, Value>, defaults: &[(&'static str, FieldDefault)]) {
    for (key, default) in defaults {
        if !object.contains_key(*key) {
            let value = default(object);
            object.insert((*key).to_string(), value);
        }
    }
}

/// Read the schema version of a document. Untagged documents are version 1.
fn schema_version(document: &Map<String, Value>) -> Result<u64, PersistError> {
    match document.get(VERSION_KEY) {
        None => Ok(1),
        Some(value) => value
            .as_u64()
            .filter(|version| *version > 0)
            .ok_or_else(|| PersistError::MalformedVersion(value.clone())),
    }
}

/// Upgrade a document from `version` to [`SCHEMA_VERSION`] in place.
fn migrate(document: &mut Map<String, Value>, version: u64) {
    for migration in MIGRATIONS
        .iter()
        .skip_while(|m| u64::from(m.from) < version)
    {
        migration.apply(document);
        tracing::info!(
            from = migration.from,
            to = migration.from + 1,
            "Migrated snapshot"
        );
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaggedSnapshot<'a> {
    schema_version: u32,
    #[serde(flatten)]
    state: &'a GameState,
}

/// Serialize a full snapshot of `state`.
pub fn export_state(state: &GameState) -> Result<String, PersistError> {
    let snapshot = TaggedSnapshot {
        schema_version: SCHEMA_VERSION,
        state,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Restore a state from a snapshot of this or any older schema version.
pub fn import_state(json: &str) -> Result<GameState, PersistError> {
    let mut document = match serde_json::from_str::<Value>(json)? {
        Value::Object(document) => document,
        _ => return Err(PersistError::NotAnObject),
    };

    let version = schema_version(&document)?;
    if version > u64::from(SCHEMA_VERSION) {
        return Err(PersistError::UnsupportedVersion {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }
    migrate(&mut document, version);

    let state: GameState = serde_json::from_value(Value::Object(document))?;
    state.validate()?;
    Ok(state)
}

/// An exported snapshot, ready to hand to the user as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub contents: String,
}

impl ExportDocument {
    /// Export `state` under the default file name.
    pub fn of(state: &GameState) -> Result<Self, PersistError> {
        Ok(Self {
            file_name: DEFAULT_EXPORT_FILENAME.to_string(),
            contents: export_state(state)?,
        })
    }

    /// Write the document into `dir`, returning the path written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, PersistError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}
