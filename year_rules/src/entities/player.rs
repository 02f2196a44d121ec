//! Player definitions.

use serde::{Deserialize, Serialize};

/// A participant in the session.
///
/// Identity is the id; the name is only for display and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// Create a new player.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Create the player sitting at `seat` (0-based) of a freshly started game.
    ///
    /// Seats are numbered from 1 and an empty name falls back to `Player {n}`.
    pub fn seated(seat: usize, name: &str) -> Self {
        let number = seat + 1;
        let name = name.trim();
        Self {
            id: number.to_string(),
            name: if name.is_empty() {
                format!("Player {number}")
            } else {
                name.to_string()
            },
        }
    }
}
