//! Session mechanics: the season cycle and the prompts that drive each turn.

mod prompts;

pub use prompts::*;

use serde::{Deserialize, Serialize};

/// Number of turns each player takes per season.
pub const TURNS_PER_PLAYER_PER_SEASON: u32 = 2;

/// Number of turns each player takes over a full year.
pub const TURNS_PER_PLAYER_PER_YEAR: u32 = TURNS_PER_PLAYER_PER_SEASON * Season::ALL.len() as u32;

/// Seasons of the year, in their fixed cyclic order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// All seasons in cycle order, starting from the first season of a year.
    pub const ALL: [Season; 4] = [
        Season::Spring,
        Season::Summer,
        Season::Autumn,
        Season::Winter,
    ];

    /// The season that follows this one. Winter wraps back to Spring.
    pub fn next(self) -> Self {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }

    /// Whether this season opens a new year.
    pub fn starts_year(self) -> bool {
        self == Season::Spring
    }

    /// Display name of the season.
    pub fn name(self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
