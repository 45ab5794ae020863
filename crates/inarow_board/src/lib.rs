//! Board model and wire protocol for N-in-a-row games.
//!
//! Gomoku, connect-four, hex, tic-tac-toe and unbounded variants share one
//! engine: a [`Board`] over square, hex or triangle grids that validates
//! placements, applies gravity, grows when play nears an edge, and reports
//! every line a placement completes.
//!
//! # Architecture
//!
//! - **Coordinates**: signed grid coordinates and their storage indices
//! - **Board**: occupancy, bounds, expansion and win detection
//! - **Options / turns**: room configuration and turn arithmetic
//! - **Protocol**: messages exchanged between rooms and participants
//! - **Client**: a participant's read-only mirror of a room, and offline play
//!
//! # Example
//!
//! ```
//! use inarow_board::{Board, BoardSize, Coord, GridTopology, Line, PlayerColor};
//!
//! let mut board = Board::new(5, false, GridTopology::Square, BoardSize::Infinite);
//! for x in 0..4 {
//!     board.set_cell(x, 0, PlayerColor::Red).unwrap();
//! }
//! let placement = board.set_cell(4, 0, PlayerColor::Red).unwrap();
//! assert_eq!(placement.winning_lines, Some(vec![Line::new(Coord::new(0, 0), Coord::new(4, 0))]));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod client;
mod color;
mod coord;
mod dispatch;
mod local;
mod options;
mod protocol;
mod topology;
mod turn;

// Crate-level exports - Coordinates
pub use coord::{
    Coord, StorageKey, cartesian_to_hex, from_storage_index, hex_to_cartesian, is_even_row,
    to_storage_index,
};

// Crate-level exports - Board
pub use board::{
    Board, Bounds, ExpansionPolicy, GRAVITY_FLOOR, Line, Placement, PlacementError, Rect,
    winning_lines,
};
pub use color::PlayerColor;
pub use topology::{Direction, GridTopology};

// Crate-level exports - Options and turns
pub use options::{
    BoardSize, MAX_TEAM_SIZE, MAX_TURNS_PER_ROUND, OptionsError, RoomOptions, TeamOrderPolicy,
};
pub use turn::TurnOrder;

// Crate-level exports - Protocol
pub use protocol::{ClientMessage, RoomSummary, ServerMessage};

// Crate-level exports - Client side
pub use client::{ClientRoom, ProjectionError, ViewEvent};
pub use dispatch::{Dispatcher, Subscription};
pub use local::{LocalError, LocalGame, LocalOutcome};
