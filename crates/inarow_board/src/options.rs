//! Room configuration chosen when a room is created.

use crate::board::ExpansionPolicy;
use crate::color::PlayerColor;
use crate::topology::GridTopology;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest accepted `teamSize`.
pub const MAX_TEAM_SIZE: u32 = 64;

/// Largest accepted `playerTurnsPerRound`.
pub const MAX_TURNS_PER_ROUND: u32 = 64;

/// How a newly joined participant is placed in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TeamOrderPolicy {
    /// Append to the end of the roster.
    #[default]
    Join,
    /// Insert at a uniformly random index among `len + 1` positions.
    Random,
}

/// Extent of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardSize {
    /// No bounds at all.
    #[default]
    Infinite,
    /// A `width × height` board that may grow while play nears an edge.
    Finite {
        /// Initial column count.
        width: u32,
        /// Initial row count (visual rows for triangle grids).
        height: u32,
        /// When and how far the board grows.
        expansion: ExpansionPolicy,
    },
}

/// Immutable snapshot of a room's board and team configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireOptions", into = "WireOptions")]
pub struct RoomOptions {
    /// Run length needed to win.
    pub n_in_a_row: u32,
    /// Number of teams (and colors in play), 1-8.
    pub team_count: u32,
    /// Players per team.
    pub team_size: u32,
    /// Consecutive placements each player makes per turn.
    pub player_turns_per_round: u32,
    /// Pieces drop to the lowest free row of their column.
    pub gravity: bool,
    /// Cell shape.
    pub grid_topology: GridTopology,
    /// Turn-order assignment for joiners.
    pub team_order_policy: TeamOrderPolicy,
    /// Reject placements from participants whose turn it is not.
    pub enforce_turns: bool,
    /// Board extent.
    pub size: BoardSize,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self::gomoku()
    }
}

impl RoomOptions {
    /// Five in a row on an unbounded square grid, two players.
    pub fn gomoku() -> Self {
        Self {
            n_in_a_row: 5,
            team_count: 2,
            team_size: 1,
            player_turns_per_round: 1,
            gravity: false,
            grid_topology: GridTopology::Square,
            team_order_policy: TeamOrderPolicy::Join,
            enforce_turns: true,
            size: BoardSize::Infinite,
        }
    }

    /// Four in a row on a 7×6 gravity board.
    pub fn connect_four() -> Self {
        Self {
            n_in_a_row: 4,
            gravity: true,
            size: BoardSize::Finite {
                width: 7,
                height: 6,
                expansion: ExpansionPolicy::default(),
            },
            ..Self::gomoku()
        }
    }

    /// Three in a row on a fixed 3×3 board.
    pub fn tic_tac_toe() -> Self {
        Self {
            n_in_a_row: 3,
            size: BoardSize::Finite {
                width: 3,
                height: 3,
                expansion: ExpansionPolicy::default(),
            },
            ..Self::gomoku()
        }
    }

    /// Participants needed before the game starts.
    pub fn seat_count(&self) -> usize {
        self.team_count as usize * self.team_size as usize
    }

    /// Checks every numeric field against its allowed range.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.n_in_a_row < 1 {
            return Err(OptionsError::new("nInARow must be at least 1."));
        }
        if self.team_count < 1 || self.team_count as usize > PlayerColor::COUNT {
            return Err(OptionsError::new(format!(
                "teamCount must be between 1 and {}.",
                PlayerColor::COUNT
            )));
        }
        if self.team_size < 1 {
            return Err(OptionsError::new("teamSize must be at least 1."));
        }
        if self.team_size > MAX_TEAM_SIZE {
            return Err(OptionsError::new(format!(
                "teamSize must be at most {}.",
                MAX_TEAM_SIZE
            )));
        }
        if self.player_turns_per_round < 1 {
            return Err(OptionsError::new("playerTurnsPerRound must be at least 1."));
        }
        if self.player_turns_per_round > MAX_TURNS_PER_ROUND {
            return Err(OptionsError::new(format!(
                "playerTurnsPerRound must be at most {}.",
                MAX_TURNS_PER_ROUND
            )));
        }
        if let BoardSize::Finite { width, height, .. } = self.size
            && (width < 1 || height < 1)
        {
            return Err(OptionsError::new("Board width and height must be at least 1."));
        }
        Ok(())
    }
}

/// Flat camelCase wire shape of [`RoomOptions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOptions {
    n_in_a_row: u32,
    team_count: u32,
    team_size: u32,
    #[serde(default = "default_one")]
    player_turns_per_round: u32,
    #[serde(default)]
    gravity: bool,
    #[serde(default)]
    grid_topology: GridTopology,
    #[serde(default)]
    team_order_policy: TeamOrderPolicy,
    #[serde(default = "default_true")]
    enforce_turns: bool,
    infinite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expand_margin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expand_density: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    density_is_percent: Option<bool>,
}

fn default_one() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl TryFrom<WireOptions> for RoomOptions {
    type Error = OptionsError;

    fn try_from(wire: WireOptions) -> Result<Self, Self::Error> {
        let size = if wire.infinite {
            BoardSize::Infinite
        } else {
            let (Some(width), Some(height)) = (wire.width, wire.height) else {
                return Err(OptionsError::new("Finite boards need a width and height."));
            };
            BoardSize::Finite {
                width,
                height,
                expansion: ExpansionPolicy {
                    margin: wire.expand_margin.unwrap_or(0),
                    density: wire.expand_density.unwrap_or(0),
                    density_is_percent: wire.density_is_percent.unwrap_or(false),
                },
            }
        };
        Ok(Self {
            n_in_a_row: wire.n_in_a_row,
            team_count: wire.team_count,
            team_size: wire.team_size,
            player_turns_per_round: wire.player_turns_per_round,
            gravity: wire.gravity,
            grid_topology: wire.grid_topology,
            team_order_policy: wire.team_order_policy,
            enforce_turns: wire.enforce_turns,
            size,
        })
    }
}

impl From<RoomOptions> for WireOptions {
    fn from(options: RoomOptions) -> Self {
        let mut wire = WireOptions {
            n_in_a_row: options.n_in_a_row,
            team_count: options.team_count,
            team_size: options.team_size,
            player_turns_per_round: options.player_turns_per_round,
            gravity: options.gravity,
            grid_topology: options.grid_topology,
            team_order_policy: options.team_order_policy,
            enforce_turns: options.enforce_turns,
            infinite: true,
            width: None,
            height: None,
            expand_margin: None,
            expand_density: None,
            density_is_percent: None,
        };
        if let BoardSize::Finite {
            width,
            height,
            expansion,
        } = options.size
        {
            wire.infinite = false;
            wire.width = Some(width);
            wire.height = Some(height);
            wire.expand_margin = Some(expansion.margin);
            wire.expand_density = Some(expansion.density);
            wire.density_is_percent = Some(expansion.density_is_percent);
        }
        wire
    }
}

/// Invalid room options.
#[derive(Debug, Clone, Display, Error)]
#[display("{}", message)]
pub struct OptionsError {
    /// Human-readable reason, sent back to the requester.
    pub message: String,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl OptionsError {
    /// Creates an options error tagged with the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
