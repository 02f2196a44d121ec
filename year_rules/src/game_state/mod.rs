//! Game state management - the single aggregate holding a session's data.
//!
//! [`GameState`] embeds both the turn clock (see `clock`) and the feature
//! store (see `store`). Its mutators are crate-private: outside this crate the
//! state is only ever changed through [`crate::GameEngine`].

mod clock;
mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::entities::{BuiltFeature, Player};
use crate::mechanics::{Season, SeasonPrompts, TURNS_PER_PLAYER_PER_SEASON};

/// Preconditions a session must satisfy before it can run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("a session needs at least one player")]
    NoPlayers,

    #[error("no prompts configured for {0}")]
    EmptyPrompts(Season),

    #[error("current player index {index} is out of range for {players} players")]
    PlayerIndexOutOfRange { index: usize, players: usize },

    #[error("season turn count {count} must stay below the season length of {limit}")]
    SeasonTurnOutOfRange { count: u32, limit: u32 },
}

/// Where the session currently stands, as shown on the date banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    pub turn: u32,
    pub season: Season,
    pub year: u32,
}

impl std::fmt::Display for TurnInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Turn {} · {}, Year {}", self.turn, self.season, self.year)
    }
}

/// The complete state of a session at any point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Seating order, fixed for the session.
    players: Vec<Player>,
    current_player_index: usize,
    current_season: Season,

    /// Sequential turn number across the whole game, starting at 1.
    global_turn_count: u32,
    /// Turns taken so far in the current season.
    season_turn_count: u32,

    /// Configured turn budget per player. Only feeds the completion signal.
    turns_per_player: u32,
    year: u32,

    prompts: SeasonPrompts,
    built_features: BTreeMap<String, BuiltFeature>,
}

impl GameState {
    /// Start a fresh session with the default prompts.
    pub fn new(players: Vec<Player>, turns_per_player: u32) -> Result<Self, RulesError> {
        Self::with_prompts(players, turns_per_player, SeasonPrompts::default())
    }

    /// Start a fresh session with custom prompts.
    pub fn with_prompts(
        players: Vec<Player>,
        turns_per_player: u32,
        prompts: SeasonPrompts,
    ) -> Result<Self, RulesError> {
        let state = Self {
            players,
            current_player_index: 0,
            current_season: Season::Spring,
            global_turn_count: 1,
            season_turn_count: 0,
            turns_per_player,
            year: 1,
            prompts,
            built_features: BTreeMap::new(),
        };
        state.validate()?;
        Ok(state)
    }

    /// Check the preconditions every operation relies on.
    pub(crate) fn validate(&self) -> Result<(), RulesError> {
        if self.players.is_empty() {
            return Err(RulesError::NoPlayers);
        }
        if let Some(season) = self.prompts.first_empty_season() {
            return Err(RulesError::EmptyPrompts(season));
        }
        if self.current_player_index >= self.players.len() {
            return Err(RulesError::PlayerIndexOutOfRange {
                index: self.current_player_index,
                players: self.players.len(),
            });
        }
        if self.season_turn_count >= self.season_length() {
            return Err(RulesError::SeasonTurnOutOfRange {
                count: self.season_turn_count,
                limit: self.season_length(),
            });
        }
        Ok(())
    }

    /// Players in seating order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_season(&self) -> Season {
        self.current_season
    }

    pub fn global_turn_count(&self) -> u32 {
        self.global_turn_count
    }

    pub fn season_turn_count(&self) -> u32 {
        self.season_turn_count
    }

    pub fn turns_per_player(&self) -> u32 {
        self.turns_per_player
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn prompts(&self) -> &SeasonPrompts {
        &self.prompts
    }

    /// Number of turns in one season: every player plays twice.
    pub fn season_length(&self) -> u32 {
        self.players.len() as u32 * TURNS_PER_PLAYER_PER_SEASON
    }
}

#[cfg(test)]
pub(crate) fn two_players() -> GameState {
    GameState::new(
        vec![Player::new("1", "Alice"), Player::new("2", "Bob")],
        8,
    )
    .unwrap()
}
