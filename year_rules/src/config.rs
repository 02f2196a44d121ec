//! Session configuration loaded from TOML.
//!
//! ```toml
//! years = 2
//!
//! [[players]]
//! name = "Alice"
//!
//! [[players]]
//! name = "Bob"
//! id = "bob"
//!
//! [prompts]
//! winter = ["The river froze overnight. Who is stranded on the far bank?"]
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::engine::GameEngine;
use crate::entities::Player;
use crate::game_state::{GameState, RulesError};
use crate::mechanics::{Season, SeasonPrompts, TURNS_PER_PLAYER_PER_YEAR};

/// Errors from loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Number of years must be greater than 0")]
    NoYears,

    #[error("{0} years is more turns than a session can count")]
    TooManyYears(u32),

    #[error("Invalid session: {0}")]
    Rules(#[from] RulesError),
}

/// A player seat in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Defaults to the 1-based seat number.
    pub id: Option<String>,
    /// Defaults to `Player {n}` when empty.
    pub name: String,
}

/// Per-season replacements for the default prompts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PromptOverrides {
    pub spring: Option<Vec<String>>,
    pub summer: Option<Vec<String>>,
    pub autumn: Option<Vec<String>>,
    pub winter: Option<Vec<String>>,
}

/// Everything needed to start a fresh session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub players: Vec<PlayerConfig>,

    /// Length of the game in years. Defaults to 1.
    pub years: Option<u32>,

    /// Explicit turn budget per player; takes precedence over `years`.
    pub turns_per_player: Option<u32>,

    pub prompts: PromptOverrides,
}

impl SessionConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Turn budget per player.
    pub fn turns_per_player(&self) -> Result<u32, ConfigError> {
        if let Some(turns) = self.turns_per_player {
            return Ok(turns);
        }
        match self.years.unwrap_or(1) {
            0 => Err(ConfigError::NoYears),
            years => years
                .checked_mul(TURNS_PER_PLAYER_PER_YEAR)
                .ok_or(ConfigError::TooManyYears(years)),
        }
    }

    /// Players in seating order, with defaults filled in.
    pub fn players(&self) -> Vec<Player> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, config)| {
                let mut player = Player::seated(seat, &config.name);
                if let Some(id) = config.id.as_deref().filter(|id| !id.trim().is_empty()) {
                    player.id = id.to_string();
                }
                player
            })
            .collect()
    }

    /// Default prompts with any configured overrides applied.
    pub fn prompts(&self) -> SeasonPrompts {
        let overrides = [
            (Season::Spring, &self.prompts.spring),
            (Season::Summer, &self.prompts.summer),
            (Season::Autumn, &self.prompts.autumn),
            (Season::Winter, &self.prompts.winter),
        ];

        overrides
            .into_iter()
            .fold(SeasonPrompts::default(), |prompts, (season, replacement)| {
                match replacement {
                    Some(list) => prompts.with_season(season, list.clone()),
                    None => prompts,
                }
            })
    }

    /// Build the initial state described by this configuration.
    pub fn build_state(&self) -> Result<GameState, ConfigError> {
        Ok(GameState::with_prompts(
            self.players(),
            self.turns_per_player()?,
            self.prompts(),
        )?)
    }

    /// Start a session from this configuration.
    pub fn start(&self) -> Result<GameEngine, ConfigError> {
        Ok(GameEngine::from_state(self.build_state()?))
    }
}
