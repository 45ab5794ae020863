//! Error types for room operations and server configuration.
//!
//! The `Display` text of [`JoinError`] and [`ActionError`] is exactly the
//! reason sent back to the participant in `joinReject` / `actionReject`.

use derive_more::{Display, Error, From};
use inarow_board::{OptionsError, PlacementError};
use tracing::instrument;

/// Why a join or create request was refused.
#[derive(Debug, Clone, Display, Error, From)]
pub enum JoinError {
    /// The room already started.
    #[display("Game started.")]
    Started,
    /// Every seat is taken.
    #[display("Game full.")]
    Full,
    /// Blank username.
    #[display("Bad username.")]
    BadUsername,
    /// Username longer than the configured limit.
    #[display("Username too long.")]
    UsernameTooLong,
    /// Another participant in the room uses this name.
    #[display("Username taken.")]
    UsernameTaken,
    /// The participant is already seated in another room.
    #[display("Already in a game.")]
    AlreadySeated,
    /// No room with that name.
    #[display("Game not found.")]
    NotFound,
    /// A room with that name exists.
    #[display("Room already exists.")]
    RoomExists,
    /// The room name is blank.
    #[display("Bad room name.")]
    BadRoomName,
    /// The requested options are invalid.
    #[display("{}", _0)]
    #[from]
    InvalidOptions(OptionsError),
}

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ActionError {
    /// The room is still waiting for players.
    #[display("The game has not started.")]
    NotStarted,
    /// The room already closed.
    #[display("The game is over.")]
    Closed,
    /// The requester holds no seat in this room.
    #[display("You are not in this game.")]
    NotSeated,
    /// Another seat owns the current turn.
    #[display("It's not your turn.")]
    NotYourTurn,
    /// The board refused the cell.
    #[display("{}", _0)]
    #[from]
    Placement(PlacementError),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
