//! The session controller.
//!
//! [`GameEngine`] owns one [`GameState`] and is the only way to change it. The
//! read surface (current player, prompt, turn info, features) and the write
//! surface (end turn, upsert feature, add lore) both go through here, as do
//! export and import.

use std::collections::BTreeMap;

use crate::entities::{BuiltFeature, FeatureDetails, Player, SessionId};
use crate::game_state::{GameState, RulesError, TurnInfo};
use crate::persist::{self, ExportDocument, PersistError};

/// A running session.
#[derive(Debug, Clone)]
pub struct GameEngine {
    id: SessionId,
    state: GameState,
}

impl GameEngine {
    /// Start a new session with the default prompts.
    pub fn new(players: Vec<Player>, turns_per_player: u32) -> Result<Self, RulesError> {
        Ok(Self::from_state(GameState::new(players, turns_per_player)?))
    }

    /// Wrap an already constructed state in a new session.
    pub fn from_state(state: GameState) -> Self {
        let engine = Self {
            id: SessionId::new(),
            state,
        };
        tracing::info!(
            session = %engine.id,
            players = engine.state.players().len(),
            "Session started"
        );
        engine
    }

    /// Restore a session from an exported snapshot.
    pub fn import(json: &str) -> Result<Self, PersistError> {
        let state = persist::import_state(json)?;
        Ok(Self::from_state(state))
    }

    /// Export a full snapshot of the session.
    pub fn export(&self) -> Result<ExportDocument, PersistError> {
        ExportDocument::of(&self.state)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// A point-in-time copy of the whole state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn current_player(&self) -> &Player {
        self.state.current_player()
    }

    pub fn current_prompt(&self) -> &str {
        self.state.current_prompt()
    }

    pub fn current_turn_info(&self) -> TurnInfo {
        self.state.current_turn_info()
    }

    /// Whether the configured turn budget has been used up.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// End the active player's turn.
    pub fn end_turn(&mut self) {
        self.state.end_turn();
    }

    /// Create or edit a feature.
    pub fn upsert_feature(&mut self, id: &str, details: FeatureDetails) {
        self.state.upsert_feature(id, details);
    }

    /// Append a lore note by the active player.
    pub fn add_to_lore_history(&mut self, id: &str, text: impl Into<String>) {
        self.state.add_to_lore_history(id, text);
    }

    /// Get a feature by ID.
    pub fn feature(&self, id: &str) -> Option<&BuiltFeature> {
        self.state.feature(id)
    }

    /// Number of features recorded so far.
    pub fn feature_count(&self) -> usize {
        self.state.feature_count()
    }

    /// A point-in-time copy of every feature.
    pub fn features(&self) -> BTreeMap<String, BuiltFeature> {
        self.state.features_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::FeatureType;
    use crate::mechanics::Season;

    fn alice_and_bob() -> GameEngine {
        GameEngine::new(
            vec![Player::new("1", "Alice"), Player::new("2", "Bob")],
            8,
        )
        .unwrap()
    }

    #[test]
    fn test_new_engine() {
        let engine = alice_and_bob();

        assert_eq!(engine.current_player().name, "Alice");
        assert_eq!(
            engine.current_turn_info(),
            TurnInfo {
                turn: 1,
                season: Season::Spring,
                year: 1
            }
        );
        assert!(engine.current_prompt().starts_with("A new settlement"));
        assert!(!engine.is_complete());
    }

    #[test]
    fn test_rejects_empty_table() {
        assert!(matches!(
            GameEngine::new(vec![], 8),
            Err(RulesError::NoPlayers)
        ));
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(alice_and_bob().id(), alice_and_bob().id());
    }

    #[test]
    fn test_round_trip() {
        let mut engine = alice_and_bob();
        let bob = Player::new("2", "Bob");

        engine.add_to_lore_history("shape:a", "Found ruins");
        engine.end_turn();
        engine.upsert_feature(
            "shape:b",
            FeatureDetails::by(&bob)
                .with_description("The Salt Road")
                .with_lore("Traders walk it at night")
                .with_type(FeatureType::Locations),
        );
        engine.add_to_lore_history("shape:b", "Bandits were seen");
        for _ in 0..10 {
            engine.end_turn();
        }
        engine.add_to_lore_history("shape:a", "The ruins collapsed");

        let exported = engine.export().unwrap();
        let restored = GameEngine::import(&exported.contents).unwrap();

        assert_eq!(restored.state(), engine.state());
        assert_eq!(restored.current_player(), engine.current_player());
        assert_eq!(restored.current_turn_info(), engine.current_turn_info());
        assert_eq!(restored.features(), engine.features());
        assert_ne!(restored.id(), engine.id());
    }

    #[test]
    fn test_restored_session_keeps_playing() {
        let mut engine = alice_and_bob();
        for _ in 0..3 {
            engine.end_turn();
        }

        let mut restored = GameEngine::import(&engine.export().unwrap().contents).unwrap();
        engine.end_turn();
        restored.end_turn();

        assert_eq!(restored.state(), engine.state());
        assert_eq!(restored.current_turn_info().season, Season::Summer);
    }

    #[test]
    fn test_failed_import_leaves_session_alone() {
        let mut engine = alice_and_bob();
        engine.end_turn();
        let before = engine.snapshot();

        assert!(GameEngine::import("not json").is_err());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_features_are_snapshots() {
        let mut engine = alice_and_bob();
        engine.add_to_lore_history("a", "note");

        let features = engine.features();
        engine.add_to_lore_history("a", "second note");

        assert_eq!(features["a"].lore_history.len(), 1);
        assert_eq!(engine.feature_count(), 1);
        assert_eq!(engine.feature("a").unwrap().lore_history.len(), 2);
        assert!(engine.feature("missing").is_none());
    }
}
