//! The turn clock: player rotation, seasons, years and prompt selection.

use super::{GameState, TurnInfo};

impl GameState {
    /// End the active player's turn.
    ///
    /// Rotation is strictly round-robin. Once every player has had two turns
    /// the season advances, and the Winter to Spring wrap starts a new year.
    pub(crate) fn end_turn(&mut self) {
        self.global_turn_count += 1;
        self.season_turn_count += 1;
        self.current_player_index = (self.current_player_index + 1) % self.players.len();

        if self.season_turn_count >= self.season_length() {
            self.advance_season();
        }

        tracing::debug!(
            turn = self.global_turn_count,
            season = %self.current_season,
            player = %self.current_player().name,
            "Turn ended"
        );
    }

    fn advance_season(&mut self) {
        self.current_season = self.current_season.next();
        self.season_turn_count = 0;

        if self.current_season.starts_year() {
            self.year += 1;
            tracing::info!(year = self.year, "A new year begins");
        } else {
            tracing::info!(season = %self.current_season, year = self.year, "Season changed");
        }
    }

    /// The prompt for the current turn.
    ///
    /// Prompts alternate through the season's list by season turn, whoever the
    /// active player is.
    pub fn current_prompt(&self) -> &str {
        let prompts = self.prompts.for_season(self.current_season);
        &prompts[self.season_turn_count as usize % prompts.len()]
    }

    /// Current turn, season and year.
    pub fn current_turn_info(&self) -> TurnInfo {
        TurnInfo {
            turn: self.global_turn_count,
            season: self.current_season,
            year: self.year,
        }
    }

    /// Turns played so far across the whole game.
    pub fn turns_taken(&self) -> u32 {
        self.global_turn_count.saturating_sub(1)
    }

    /// Total turns the configured budget allows for the table.
    pub fn total_turns(&self) -> u32 {
        (self.players.len() as u32).saturating_mul(self.turns_per_player)
    }

    pub fn turns_remaining(&self) -> u32 {
        self.total_turns().saturating_sub(self.turns_taken())
    }

    /// Whether every player has used their turn budget.
    ///
    /// Play may continue past this point; it is a signal, not a stop.
    pub fn is_complete(&self) -> bool {
        self.turns_taken() >= self.total_turns()
    }
}
