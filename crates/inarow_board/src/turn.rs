//! Turn arithmetic shared by the server room, the offline game and clients.
//!
//! A turn index counts individual placements within a round. Each turn slot
//! (a roster position) owns `player_turns_per_round` consecutive indices, and
//! each team owns `team_size` consecutive slots.

use crate::color::PlayerColor;
use crate::options::RoomOptions;

/// Turn layout derived from room options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    seats: usize,
    team_size: usize,
    player_turns: usize,
}

impl TurnOrder {
    /// Layout for a full roster.
    pub fn new(options: &RoomOptions) -> Self {
        Self::with_seats(options, options.seat_count())
    }

    /// Layout for a roster of `seats` participants (used when a room is
    /// forced to start before it fills up).
    pub fn with_seats(options: &RoomOptions, seats: usize) -> Self {
        Self {
            seats: seats.max(1),
            team_size: (options.team_size as usize).max(1),
            player_turns: (options.player_turns_per_round as usize).max(1),
        }
    }

    /// Number of seats in play.
    pub fn seats(&self) -> usize {
        self.seats
    }

    /// Turn indices per full round; `turn_index` wraps modulo this. Never
    /// zero.
    pub fn turn_count(&self) -> usize {
        self.seats.saturating_mul(self.player_turns)
    }

    /// Roster slot that owns `turn`.
    pub fn slot_for(&self, turn: usize) -> usize {
        turn / self.player_turns
    }

    /// Team index playing at `turn`.
    pub fn team_for(&self, turn: usize) -> usize {
        turn / self.team_size / self.player_turns
    }

    /// Color placed at `turn`, if the team index maps to one.
    pub fn color_for(&self, turn: usize) -> Option<PlayerColor> {
        PlayerColor::from_index(self.team_for(turn))
    }

    /// Turn index following `turn`.
    pub fn advance(&self, turn: usize) -> usize {
        turn.saturating_add(1) % self.turn_count()
    }
}
