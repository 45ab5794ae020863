//! Offline hot-seat play: every team shares one device.

use crate::board::{Board, Line, PlacementError};
use crate::color::PlayerColor;
use crate::options::RoomOptions;
use crate::turn::TurnOrder;
use tracing::{info, instrument};

/// Result of a local placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    /// Play continues.
    Continue {
        /// Turn index now to move.
        next_turn: usize,
    },
    /// The placing team won.
    Won {
        /// Winning color.
        color: PlayerColor,
        /// Completed lines.
        lines: Vec<Line>,
    },
    /// No cell left and nobody won.
    BoardFull,
}

/// Why a local placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LocalError {
    /// The board refused the cell.
    #[display("{}", _0)]
    Placement(PlacementError),
    /// The game is over.
    #[display("The game is over.")]
    GameOver,
}

/// A game played on one device, with no turn ownership.
#[derive(Debug, Clone)]
pub struct LocalGame {
    board: Board,
    order: TurnOrder,
    turn: usize,
    ended: bool,
}

impl LocalGame {
    /// Starts a game with the given options.
    #[instrument]
    pub fn new(options: &RoomOptions) -> Self {
        Self {
            board: Board::from_options(options),
            order: TurnOrder::new(options),
            turn: 0,
            ended: false,
        }
    }

    /// Places the current color at `(x, y)`.
    #[instrument(skip(self), fields(turn = self.turn))]
    pub fn place(&mut self, x: i64, y: i64) -> Result<LocalOutcome, LocalError> {
        if self.ended {
            return Err(LocalError::GameOver);
        }
        let team = self.order.team_for(self.turn);
        let color = PlayerColor::from_index(team).ok_or(PlacementError::InvalidColor(
            u8::try_from(team).unwrap_or(u8::MAX),
        ))?;
        let placement = self.board.set_cell(x, y, color)?;
        self.turn = self.order.advance(self.turn);

        if let Some(lines) = placement.winning_lines {
            info!(%color, "Local game won");
            self.ended = true;
            return Ok(LocalOutcome::Won { color, lines });
        }
        if self.board.is_full() {
            info!("Local game ended on a full board");
            self.ended = true;
            return Ok(LocalOutcome::BoardFull);
        }
        Ok(LocalOutcome::Continue {
            next_turn: self.turn,
        })
    }

    /// Color that places next.
    pub fn current_color(&self) -> Option<PlayerColor> {
        self.order.color_for(self.turn)
    }

    /// Current turn index.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// True once won or full.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}
